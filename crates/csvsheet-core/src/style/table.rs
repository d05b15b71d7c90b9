//! Append-only style table

use tracing::trace;

use super::{CellFormat, Fill, Font, NumberFormat, FIRST_CUSTOM_ID};
use crate::error::{Error, Result};

/// Index of the default cell format
pub const DEFAULT_CELL_FORMAT: u32 = 0;

/// Index of the pre-registered date cell format
pub const DATE_CELL_FORMAT: u32 = 1;

/// Fonts, fills, number formats and cell formats shared by a workbook
///
/// Entries are identified by insertion index and are never removed or
/// changed. A new table already holds the entries every stylesheet needs:
/// one default font, the `none` and `gray125` fills, the date number format
/// and cell formats [`DEFAULT_CELL_FORMAT`] and [`DATE_CELL_FORMAT`].
#[derive(Debug, Clone)]
pub struct StyleTable {
    fonts: Vec<Font>,
    fills: Vec<Fill>,
    number_formats: Vec<NumberFormat>,
    cell_formats: Vec<CellFormat>,
}

impl StyleTable {
    /// Create a table holding only the defaults
    pub fn new() -> Self {
        let date = NumberFormat::default_date();
        let date_format = CellFormat::new().number_format(date.id);
        Self {
            fonts: vec![Font::default()],
            fills: vec![Fill::None, Fill::gray125()],
            number_formats: vec![date],
            cell_formats: vec![CellFormat::default(), date_format],
        }
    }

    /// Append a font, returning its id
    pub fn register_font(&mut self, font: Font) -> u32 {
        push(&mut self.fonts, font)
    }

    /// Append a fill, returning its id
    pub fn register_fill(&mut self, fill: Fill) -> u32 {
        push(&mut self.fills, fill)
    }

    /// Append a custom number format, returning its format id
    pub fn register_number_format<S: Into<String>>(&mut self, code: S) -> u32 {
        let id = self
            .number_formats
            .last()
            .map_or(FIRST_CUSTOM_ID, |f| (f.id + 1).max(FIRST_CUSTOM_ID));
        self.number_formats.push(NumberFormat::new(id, code));
        id
    }

    /// Append a cell format, returning its index
    ///
    /// Font, fill and number format ids must already be known to the table.
    pub fn register_cell_format(&mut self, format: CellFormat) -> Result<u32> {
        if let Some(id) = format.font {
            if id as usize >= self.fonts.len() {
                return Err(Error::InvalidStyleIndex { kind: "font", index: id });
            }
        }
        if let Some(id) = format.fill {
            if id as usize >= self.fills.len() {
                return Err(Error::InvalidStyleIndex { kind: "fill", index: id });
            }
        }
        if let Some(id) = format.number_format {
            if !self.has_number_format(id) {
                return Err(Error::InvalidStyleIndex {
                    kind: "number format",
                    index: id,
                });
            }
        }
        let index = push(&mut self.cell_formats, format);
        trace!(index, "registered cell format");
        Ok(index)
    }

    /// Whether `id` is a built-in or registered number format
    pub fn has_number_format(&self, id: u32) -> bool {
        NumberFormat::is_builtin(id) || self.number_formats.iter().any(|f| f.id == id)
    }

    /// Whether `index` names a cell format
    pub fn has_cell_format(&self, index: u32) -> bool {
        (index as usize) < self.cell_formats.len()
    }

    /// Get a cell format by index
    pub fn cell_format(&self, index: u32) -> Option<&CellFormat> {
        self.cell_formats.get(index as usize)
    }

    /// Fonts in id order
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    /// Fills in id order
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Custom number formats in registration order
    pub fn number_formats(&self) -> &[NumberFormat] {
        &self.number_formats
    }

    /// Cell formats in index order
    pub fn cell_formats(&self) -> &[CellFormat] {
        &self.cell_formats
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

fn push<T>(items: &mut Vec<T>, item: T) -> u32 {
    items.push(item);
    (items.len() - 1) as u32
}
