//! Prelude module - common imports for csvsheet users
//!
//! ```rust
//! use csvsheet::prelude::*;
//! ```

pub use crate::{
    // Conversion
    convert,
    convert_file,
    CancelFlag,
    // Cell types
    CellRange,
    CellRef,
    CellValue,
    ColumnKind,
    Conversion,
    ConvertOptions,
    ConvertStats,
    // I/O
    CsvError,
    CsvReader,
    // Error types
    Error,
    IngestOptions,
    Result,
    // Main types
    Workbook,
    Worksheet,
    XlsxWriter,
};
