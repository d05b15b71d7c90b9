//! Error type for conversions

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting
///
/// Cancellation is not an error; see [`crate::Conversion::Cancelled`].
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or parsing the delimited input failed
    #[error(transparent)]
    Csv(#[from] csvsheet_csv::CsvError),

    /// Writing the package failed
    #[error(transparent)]
    Xlsx(#[from] csvsheet_xlsx::XlsxError),

    /// The workbook could not be built
    #[error(transparent)]
    Core(#[from] csvsheet_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The staged output could not be moved into place
    #[error("Failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// The output path would overwrite the input
    #[error("Output path is the input file: {}", .0.display())]
    OutputIsInput(PathBuf),
}
