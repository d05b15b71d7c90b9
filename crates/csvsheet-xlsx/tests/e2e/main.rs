//! End-to-end tests for csvsheet-xlsx.
//!
//! Each test builds a workbook, writes the package into memory (or a temp
//! file), then opens the archive again and inspects the emitted parts with
//! `zip` and `quick-xml`.

mod common;
mod package;
mod worksheet;

pub use common::*;
