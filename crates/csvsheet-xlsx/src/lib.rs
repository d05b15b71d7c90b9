//! # csvsheet-xlsx
//!
//! Writes a finalized [`csvsheet_core::Workbook`] as an XLSX (Office Open
//! XML) package: content types, relationships, workbook, stylesheet and one
//! part per worksheet, inside a ZIP archive.

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
