//! Error types for csvsheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in csvsheet-core
///
/// Every variant signals either malformed addressing input or a caller
/// violating the builder contract. Cell value parse failures are not errors
/// here; see [`crate::cell::CellParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Column id, column label or row index outside the addressable range
    #[error("{0} out of range")]
    OutOfRange(String),

    /// Malformed cell reference or column label
    #[error("Invalid reference: '{0}'")]
    InvalidReference(String),

    /// Relative offset below 1, or an explicit position not past the last one
    #[error("Invalid offset for {what}: {value} (must be at least 1)")]
    InvalidOffset { what: &'static str, value: i64 },

    /// Merge span below 1
    #[error("Invalid merge span: {rows} row(s) x {cols} column(s)")]
    InvalidSpan { rows: u32, cols: u32 },

    /// A 1x1 merge request
    #[error("Merge anchored at {0} covers a single cell")]
    DegenerateRange(String),

    /// Append or finalize attempted in the wrong lifecycle phase
    #[error("Invalid worksheet state: {0}")]
    InvalidState(String),

    /// A relative operation needed a previous row or cell and found none
    #[error("No anchor for relative {0}: append a row and cell first")]
    MissingAnchor(&'static str),

    /// Style table index that was never issued
    #[error("Invalid {kind} index: {index}")]
    InvalidStyleIndex { kind: &'static str, index: u32 },

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),
}

impl Error {
    pub(crate) fn invalid_offset(what: &'static str, value: i64) -> Self {
        Error::InvalidOffset { what, value }
    }
}
