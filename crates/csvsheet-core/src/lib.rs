//! # csvsheet-core
//!
//! Spreadsheet construction model for csvsheet.
//!
//! This crate provides the types the rest of the workspace builds on:
//! - [`cell::address`] - Column label and cell reference arithmetic
//! - [`CellValue`] - Typed cell values and their parsing from raw text
//! - [`Worksheet`] and [`Row`] - Append-only, relative sheet construction
//! - [`StyleTable`] - Fonts, fills, number formats and cell formats by index
//! - [`Workbook`] - Sheets plus the shared style table
//!
//! ## Example
//!
//! ```rust
//! use csvsheet_core::{Workbook, DATE_CELL_FORMAT};
//! use chrono::NaiveDate;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet("Sheet1").unwrap();
//!
//! sheet
//!     .append_row(1, None).unwrap()
//!     .append_cell(1, "due", None).unwrap()
//!     .append_cell(1, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), Some(DATE_CELL_FORMAT)).unwrap();
//! sheet.append_relative_row_break(1).unwrap();
//! sheet.finalize().unwrap();
//!
//! assert_eq!(sheet.dimension().unwrap().to_string(), "A1:B1");
//! ```

pub mod cancel;
pub mod cell;
pub mod column;
pub mod cursor;
pub mod error;
pub mod row;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::address;

// Re-exports for convenience
pub use cancel::CancelFlag;
pub use cell::{CellParseError, CellRange, CellRef, CellValue, ColumnKind, ParseOptions};
pub use column::ColumnWidth;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use row::{Cell, Row};
pub use workbook::{Workbook, DEFAULT_SHEET_NAME};
pub use worksheet::{IgnoredError, PageBreak, Worksheet};

pub use style::{
    CellFormat, Color, Fill, Font, HorizontalAlignment, NumberFormat, PatternType, StyleTable,
    VerticalAlignment, DATE_CELL_FORMAT, DEFAULT_CELL_FORMAT,
};

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
