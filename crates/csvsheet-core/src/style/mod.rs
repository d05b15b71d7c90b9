//! Cell styling types
//!
//! This module contains the append-only [`StyleTable`] and the records it
//! holds:
//! - [`Font`] - Font settings
//! - [`Fill`] - Background fill
//! - [`NumberFormat`] - Custom number format codes
//! - [`CellFormat`] - A cell format combining the above with alignment

mod alignment;
mod color;
mod fill;
mod font;
mod number_format;
mod table;

pub use alignment::{HorizontalAlignment, VerticalAlignment};
pub use color::Color;
pub use fill::{Fill, PatternType};
pub use font::Font;
pub use number_format::{
    NumberFormat, DATE_FORMAT_CODE, DATE_FORMAT_ID, FIRST_CUSTOM_ID, MAX_BUILTIN_ID,
};
pub use table::{StyleTable, DATE_CELL_FORMAT, DEFAULT_CELL_FORMAT};

/// A cell format (`xf` record)
///
/// Font, fill and number format fields are ids into the owning
/// [`StyleTable`]; unset fields fall back to entry 0 / General.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellFormat {
    /// Wrap text
    pub wrap_text: Option<bool>,
    /// Text rotation in degrees (0-180, or 255 for vertical text)
    pub text_rotation: Option<u32>,
    /// Vertical alignment
    pub vertical: Option<VerticalAlignment>,
    /// Horizontal alignment
    pub horizontal: Option<HorizontalAlignment>,
    /// Font id
    pub font: Option<u32>,
    /// Number format id
    pub number_format: Option<u32>,
    /// Fill id
    pub fill: Option<u32>,
}

impl CellFormat {
    /// Create a new default cell format
    pub fn new() -> Self {
        Self::default()
    }

    /// Set wrap text
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }

    /// Set text rotation
    pub fn text_rotation(mut self, degrees: u32) -> Self {
        self.text_rotation = Some(degrees);
        self
    }

    /// Set vertical alignment
    pub fn vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = Some(align);
        self
    }

    /// Set horizontal alignment
    pub fn horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Use a registered font
    pub fn font(mut self, font_id: u32) -> Self {
        self.font = Some(font_id);
        self
    }

    /// Use a built-in or registered number format
    pub fn number_format(mut self, number_format_id: u32) -> Self {
        self.number_format = Some(number_format_id);
        self
    }

    /// Use a registered fill
    pub fn fill(mut self, fill_id: u32) -> Self {
        self.fill = Some(fill_id);
        self
    }

    /// Whether any alignment property is set
    pub fn has_alignment(&self) -> bool {
        self.wrap_text.is_some()
            || self.text_rotation.is_some()
            || self.vertical.is_some()
            || self.horizontal.is_some()
    }
}
