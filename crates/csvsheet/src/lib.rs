//! # csvsheet
//!
//! Converts delimited text with a header record into an XLSX workbook.
//! Selected columns are typed as decimals (written with two fraction digits)
//! or dates (written as serial day numbers with a date format); everything
//! else stays text.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use csvsheet::prelude::*;
//!
//! let options = ConvertOptions::new()
//!     .with_ingest(IngestOptions::new().decimal_column("B").date_column("C"));
//!
//! let input = "item,amount,due\nrent,1200,2024-03-01\n";
//! let mut output = Cursor::new(Vec::new());
//! let outcome = convert(input.as_bytes(), &mut output, &options, &CancelFlag::new()).unwrap();
//!
//! match outcome {
//!     Conversion::Completed(stats) => assert_eq!(stats.rows, 2),
//!     Conversion::Cancelled => unreachable!(),
//! }
//! ```
//!
//! The building blocks are available on their own: [`csvsheet_core`] for the
//! worksheet builder and style table, [`csvsheet_csv`] for typed ingestion
//! and [`csvsheet_xlsx`] for the package writer.

pub mod convert;
pub mod error;
pub mod prelude;

pub use convert::{
    build_workbook, convert, convert_file, default_output_path, Conversion, ConvertOptions,
    ConvertStats,
};
pub use error::{Error, Result};

// Re-export core types
pub use csvsheet_core::{
    address, CancelFlag, CellFormat, CellRange, CellRef, CellValue, Color, ColumnKind, Fill, Font,
    HorizontalAlignment, ParseOptions, StyleTable, VerticalAlignment, Workbook, Worksheet,
    DATE_CELL_FORMAT, DEFAULT_CELL_FORMAT, DEFAULT_SHEET_NAME, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use csvsheet_csv::{CsvError, CsvReader, IngestOptions, TypedRow};
pub use csvsheet_xlsx::{XlsxError, XlsxWriter};
