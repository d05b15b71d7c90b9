//! # csvsheet-csv
//!
//! Reads delimited text with a header record into typed rows, coercing the
//! selected columns into decimals and dates.
//!
//! ```rust
//! use csvsheet_csv::{CsvReader, IngestOptions};
//! use csvsheet_core::{CancelFlag, CellValue};
//!
//! let input = "name,amount\nx,3.5\n";
//! let options = IngestOptions::new().decimal_column("B");
//! let rows = CsvReader::read(input.as_bytes(), &options, &CancelFlag::new()).unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1][1].to_string(), "3.50");
//! assert_eq!(rows[0][0], CellValue::text("name"));
//! ```

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::{ColumnKinds, IngestOptions};
pub use reader::{CsvReader, TypedRow};
