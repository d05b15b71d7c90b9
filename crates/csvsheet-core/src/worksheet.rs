//! Worksheet type

use tracing::debug;

use crate::cell::{label_to_column_id, CellRange, CellRef, MAX_COLUMN_ID};
use crate::column::ColumnWidth;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::row::{Cell, Row};
use crate::MAX_ROWS;

/// Highest cell a manual page break extends to
pub const BREAK_MAX: u32 = 16_383;

/// A manual page break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBreak {
    /// Zero-based row index (row breaks) or column id (column breaks)
    /// the break follows
    pub id: u32,
    /// Extent of the break along the other axis
    pub max: u32,
    /// Inserted by the author rather than by pagination
    pub manual: bool,
}

impl PageBreak {
    fn manual(id: u32) -> Self {
        Self {
            id,
            max: BREAK_MAX,
            manual: true,
        }
    }
}

/// Suppression of consumer warnings over a range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredError {
    /// Covered range
    pub range: CellRange,
    /// Suppress "number stored as text"
    pub number_stored_as_text: bool,
    /// Suppress "two-digit year stored as text"
    pub two_digit_text_year: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Building,
    Finalized,
}

/// A worksheet under construction
///
/// Rows and cells are only ever appended, each past the last one, so the
/// sheet data is always in the order a consumer expects. Structural
/// collections start out present and empty; [`Worksheet::finalize`] drops
/// the ones that stayed empty.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    rows: Vec<Row>,
    cursor: Cursor,
    columns: Option<Vec<ColumnWidth>>,
    merged_ranges: Option<Vec<CellRange>>,
    row_breaks: Option<Vec<PageBreak>>,
    column_breaks: Option<Vec<PageBreak>>,
    ignored_errors: Option<Vec<IgnoredError>>,
    dimension: Option<CellRange>,
    phase: Phase,
}

impl Worksheet {
    /// Create a new, empty worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            cursor: Cursor::rows(),
            columns: Some(Vec::new()),
            merged_ranges: Some(Vec::new()),
            row_breaks: Some(Vec::new()),
            column_breaks: Some(Vec::new()),
            ignored_errors: Some(Vec::new()),
            dimension: None,
            phase: Phase::Building,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether [`Worksheet::finalize`] has run
    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    // === Access ===

    /// Rows in index order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Last row emitted
    pub fn last_row(&self) -> Option<&Row> {
        self.rows.last()
    }

    /// Index of the last row emitted, 0 when there is none
    pub fn last_row_index(&self) -> u32 {
        self.cursor.last().unwrap_or(0)
    }

    /// Look up a cell by address string (e.g., "B3")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let r = CellRef::parse(address)?;
        Ok(self.cell_at(r.row(), r.col()))
    }

    /// Look up a cell by row index (1-based) and column id (0-based)
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&Cell> {
        let i = self.rows.binary_search_by_key(&row, Row::index).ok()?;
        let cells = self.rows[i].cells();
        let j = cells.binary_search_by_key(&col, |c| c.col).ok()?;
        Some(&cells[j])
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells().len()).sum()
    }

    /// Column width overrides (None once finalized without any)
    pub fn columns(&self) -> Option<&[ColumnWidth]> {
        self.columns.as_deref()
    }

    /// Merged ranges
    pub fn merged_ranges(&self) -> Option<&[CellRange]> {
        self.merged_ranges.as_deref()
    }

    /// Manual row breaks
    pub fn row_breaks(&self) -> Option<&[PageBreak]> {
        self.row_breaks.as_deref()
    }

    /// Manual column breaks
    pub fn column_breaks(&self) -> Option<&[PageBreak]> {
        self.column_breaks.as_deref()
    }

    /// Ignored-error markers
    pub fn ignored_errors(&self) -> Option<&[IgnoredError]> {
        self.ignored_errors.as_deref()
    }

    /// Used range, known once finalized and only if any cell exists
    pub fn dimension(&self) -> Option<CellRange> {
        self.dimension
    }

    // === Rows ===

    /// Append a row `offset` rows past the last one (1 = adjacent)
    pub fn append_row(&mut self, offset: u32, height: Option<f64>) -> Result<&mut Row> {
        self.ensure_building()?;
        let index = self.cursor.next(offset)?;
        self.push_row(index, height)
    }

    /// Append a row at an explicit index, which must exceed the last one
    pub fn append_row_at(&mut self, row_index: u32, height: Option<f64>) -> Result<&mut Row> {
        self.ensure_building()?;
        self.cursor.check_forward(row_index)?;
        self.push_row(row_index, height)
    }

    fn push_row(&mut self, index: u32, height: Option<f64>) -> Result<&mut Row> {
        if index > MAX_ROWS {
            return Err(Error::OutOfRange(format!("row index {index}")));
        }
        if let Some(h) = height {
            check_extent("row height", h)?;
        }
        self.cursor.advance_to(index);
        let i = self.rows.len();
        self.rows.push(Row::new(index, height));
        Ok(&mut self.rows[i])
    }

    // === Merged cells ===

    /// Merge `row_span` rows by `col_span` columns starting at `anchor`
    pub fn append_merged_range(
        &mut self,
        anchor: &str,
        row_span: u32,
        col_span: u32,
    ) -> Result<CellRange> {
        self.ensure_building()?;
        let anchor = CellRef::parse(anchor)?;
        self.merge_from(anchor, row_span, col_span)
    }

    /// Merge a literal range such as `"B2:D4"`
    pub fn append_merge_reference(&mut self, range: &str) -> Result<CellRange> {
        self.ensure_building()?;
        let range = CellRange::parse(range)?;
        if range.start == range.end {
            return Err(Error::DegenerateRange(range.start.to_string()));
        }
        self.push_merge(range);
        Ok(range)
    }

    /// Merge starting at the last cell of the last row
    pub fn append_relative_merged_range(
        &mut self,
        row_span: u32,
        col_span: u32,
    ) -> Result<CellRange> {
        self.ensure_building()?;
        let anchor = self.last_cell_ref("merge")?;
        self.merge_from(anchor, row_span, col_span)
    }

    fn merge_from(&mut self, anchor: CellRef, row_span: u32, col_span: u32) -> Result<CellRange> {
        if row_span == 0 || col_span == 0 {
            return Err(Error::InvalidSpan {
                rows: row_span,
                cols: col_span,
            });
        }
        if u64::from(row_span) + u64::from(col_span) <= 2 {
            return Err(Error::DegenerateRange(anchor.to_string()));
        }
        let opposite = anchor.offset(row_span - 1, col_span - 1)?;
        let range = CellRange::new(anchor, opposite);
        self.push_merge(range);
        Ok(range)
    }

    fn push_merge(&mut self, range: CellRange) {
        self.merged_ranges.get_or_insert_with(Vec::new).push(range);
    }

    // === Page breaks ===

    /// Break the page before `before_row_index` (1-based)
    pub fn append_row_break(&mut self, before_row_index: u32) -> Result<()> {
        self.ensure_building()?;
        if before_row_index == 0 || before_row_index > MAX_ROWS {
            return Err(Error::OutOfRange(format!("row index {before_row_index}")));
        }
        self.row_breaks
            .get_or_insert_with(Vec::new)
            .push(PageBreak::manual(before_row_index - 1));
        Ok(())
    }

    /// Break the page before column `before_column_id` (0-based)
    pub fn append_column_break(&mut self, before_column_id: u32) -> Result<()> {
        self.ensure_building()?;
        if before_column_id > MAX_COLUMN_ID {
            return Err(Error::OutOfRange(format!("column id {before_column_id}")));
        }
        self.column_breaks
            .get_or_insert_with(Vec::new)
            .push(PageBreak::manual(before_column_id));
        Ok(())
    }

    /// Break the page before the column with the given label
    pub fn append_column_break_label(&mut self, label: &str) -> Result<()> {
        let id = label_to_column_id(label)?;
        self.append_column_break(id)
    }

    /// Break the page `offset` rows past the last row
    pub fn append_relative_row_break(&mut self, offset: u32) -> Result<()> {
        if offset == 0 {
            return Err(Error::invalid_offset("row break", 0));
        }
        let before = self
            .last_row_index()
            .checked_add(offset)
            .ok_or_else(|| Error::OutOfRange(format!("row break offset {offset}")))?;
        self.append_row_break(before)
    }

    /// Break the page `offset` columns past the last cell of the last row
    pub fn append_relative_column_break(&mut self, offset: u32) -> Result<()> {
        if offset == 0 {
            return Err(Error::invalid_offset("column break", 0));
        }
        let last = self.last_cell_ref("column break")?;
        let before = last
            .col()
            .checked_add(offset)
            .ok_or_else(|| Error::OutOfRange(format!("column break offset {offset}")))?;
        self.append_column_break(before)
    }

    // === Column widths ===

    /// Give columns `min..=max` (1-based, inclusive) a custom width
    pub fn append_column_width(&mut self, min: u32, max: u32, width: f64) -> Result<()> {
        self.ensure_building()?;
        if min == 0 || max < min || max > MAX_COLUMN_ID + 1 {
            return Err(Error::OutOfRange(format!("column width range {min}..={max}")));
        }
        check_extent("column width", width)?;
        self.columns
            .get_or_insert_with(Vec::new)
            .push(ColumnWidth::new(min, max, width));
        Ok(())
    }

    /// Give `span` columns a custom width, starting `offset` columns past
    /// the last declared one
    pub fn append_relative_column_width(
        &mut self,
        width: f64,
        offset: u32,
        span: u32,
    ) -> Result<()> {
        if offset == 0 {
            return Err(Error::invalid_offset("column width", 0));
        }
        if span == 0 {
            return Err(Error::InvalidSpan { rows: 1, cols: 0 });
        }
        let last_max = self
            .columns
            .as_ref()
            .and_then(|cols| cols.last())
            .map_or(0, |c| c.max);
        let min = last_max.saturating_add(offset);
        let max = min.saturating_add(span - 1);
        self.append_column_width(min, max, width)
    }

    // === Finalization ===

    /// Close the sheet for appends
    ///
    /// Computes the used range, suppresses number-as-text and two-digit-year
    /// warnings over it, and drops structural collections that stayed
    /// empty. Runs exactly once.
    pub fn finalize(&mut self) -> Result<()> {
        self.ensure_building()?;

        let mut max_row = 0;
        let mut max_col = 0;
        let mut any = false;
        for row in &self.rows {
            if let Some(cell) = row.last_cell() {
                any = true;
                max_row = max_row.max(row.index());
                max_col = max_col.max(cell.col);
            }
        }

        if any {
            let range = CellRange::new(CellRef::new(1, 0)?, CellRef::new(max_row, max_col)?);
            self.ignored_errors
                .get_or_insert_with(Vec::new)
                .push(IgnoredError {
                    range,
                    number_stored_as_text: true,
                    two_digit_text_year: true,
                });
            self.dimension = Some(range);
        }

        drop_if_empty(&mut self.columns);
        drop_if_empty(&mut self.merged_ranges);
        drop_if_empty(&mut self.row_breaks);
        drop_if_empty(&mut self.column_breaks);
        drop_if_empty(&mut self.ignored_errors);

        self.phase = Phase::Finalized;
        debug!(
            sheet = %self.name,
            rows = self.rows.len(),
            cells = self.cell_count(),
            dimension = ?self.dimension.map(|d| d.to_string()),
            "worksheet finalized"
        );
        Ok(())
    }

    fn ensure_building(&self) -> Result<()> {
        match self.phase {
            Phase::Building => Ok(()),
            Phase::Finalized => Err(Error::InvalidState(format!(
                "worksheet '{}' is already finalized",
                self.name
            ))),
        }
    }

    fn last_cell_ref(&self, what: &'static str) -> Result<CellRef> {
        let row = self.rows.last().ok_or(Error::MissingAnchor(what))?;
        let cell = row.last_cell().ok_or(Error::MissingAnchor(what))?;
        cell.reference(row.index())
    }
}

/// Widths and heights must be finite and not negative
fn check_extent(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::OutOfRange(format!("{what} {value}")))
    }
}

fn drop_if_empty<T>(items: &mut Option<Vec<T>>) {
    if items.as_ref().map_or(false, Vec::is_empty) {
        *items = None;
    }
}
