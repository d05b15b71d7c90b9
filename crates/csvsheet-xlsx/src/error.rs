//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A worksheet was handed over before `finalize`
    #[error("Worksheet '{0}' has not been finalized")]
    NotFinalized(String),

    /// Core error (e.g. a cell referencing an unknown cell format)
    #[error("Core error: {0}")]
    Core(#[from] csvsheet_core::Error),
}
