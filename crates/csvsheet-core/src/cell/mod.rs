//! Cell-related types and utilities
//!
//! This module contains:
//! - [`address`] - Column label / cell reference codec, [`CellRef`] and [`CellRange`]
//! - [`CellValue`] - The value stored in a cell
//! - [`ColumnKind`] and [`ParseOptions`] - How raw text becomes a [`CellValue`]

pub mod address;
mod parse;
mod value;

pub use address::{
    column_id_to_label, label_to_column_id, parse_cell_reference, CellRange, CellRef,
    MAX_COLUMN_ID, MAX_LABEL_LEN,
};
pub use parse::{parse_date, parse_decimal, CellParseError, ColumnKind, ParseOptions};
pub use value::{format_number, serial_date, CellValue};
