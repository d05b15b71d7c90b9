//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV ingestion
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unparseable field (strict mode only)
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        /// Row index in the output sheet (the header is row 1)
        row: usize,
        /// Column label
        column: String,
        message: String,
    },

    /// Core error (e.g. an invalid column selector)
    #[error("Core error: {0}")]
    Core(#[from] csvsheet_core::Error),

    /// Cancellation was requested before all records were read
    #[error("Ingestion cancelled")]
    Cancelled,
}
