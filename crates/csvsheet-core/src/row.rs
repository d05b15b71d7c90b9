//! Row types

use crate::cell::{label_to_column_id, CellRef, CellValue, MAX_COLUMN_ID};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// A single cell within a row
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Column id (0-based)
    pub col: u32,
    /// Stored value
    pub value: CellValue,
    /// Cell format index into the workbook style table (None = default)
    pub style: Option<u32>,
}

impl Cell {
    /// Reference of this cell when it lives in row `row`
    pub fn reference(&self, row: u32) -> Result<CellRef> {
        CellRef::new(row, self.col)
    }
}

/// A row under construction
///
/// Cells are kept in strictly increasing column order; the row's column
/// cursor remembers the last one emitted.
#[derive(Debug, Clone)]
pub struct Row {
    index: u32,
    height: Option<f64>,
    cells: Vec<Cell>,
    cursor: Cursor,
}

impl Row {
    pub(crate) fn new(index: u32, height: Option<f64>) -> Self {
        Self {
            index,
            height,
            cells: Vec::new(),
            cursor: Cursor::columns(),
        }
    }

    /// Row index (1-based)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Custom height (None = default)
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    /// Cells in column order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Last cell emitted
    pub fn last_cell(&self) -> Option<&Cell> {
        self.cells.last()
    }

    /// Check if row has any cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Append a cell `offset` columns past the last one (1 = adjacent)
    ///
    /// The first cell of a row lands in column `offset - 1`, so offset 1
    /// starts at `A`.
    pub fn append_cell<V: Into<CellValue>>(
        &mut self,
        offset: u32,
        value: V,
        style: Option<u32>,
    ) -> Result<&mut Self> {
        let col = self.cursor.next(offset)?;
        self.push(col, value.into(), style)
    }

    /// Append a cell at an explicit column label
    ///
    /// The column must lie past the last cell of the row.
    pub fn append_cell_at<V: Into<CellValue>>(
        &mut self,
        label: &str,
        value: V,
        style: Option<u32>,
    ) -> Result<&mut Self> {
        let col = label_to_column_id(label)?;
        self.cursor.check_forward(col)?;
        self.push(col, value.into(), style)
    }

    fn push(&mut self, col: u32, value: CellValue, style: Option<u32>) -> Result<&mut Self> {
        if col > MAX_COLUMN_ID {
            return Err(Error::OutOfRange(format!("column id {col}")));
        }
        self.cursor.advance_to(col);
        self.cells.push(Cell { col, value, style });
        Ok(self)
    }
}
