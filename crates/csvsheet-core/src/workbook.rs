//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::style::StyleTable;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Name of the sheet a conversion writes to
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// A workbook (spreadsheet document)
///
/// Owns the shared [`StyleTable`] and an ordered list of worksheets. Sheet
/// ids are 1-based and follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Styles shared by every sheet
    styles: StyleTable,
}

impl Workbook {
    /// Create an empty workbook with the default styles and no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a worksheet and return it for building
    pub fn add_worksheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.validate_sheet_name(name)?;
        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(&mut self.worksheets[index])
    }

    /// Shared style table
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Shared style table, for registering entries
    pub fn styles_mut(&mut self) -> &mut StyleTable {
        &mut self.styles
    }

    /// Finalize every worksheet not yet finalized
    pub fn finalize(&mut self) -> Result<()> {
        for ws in self.worksheets.iter_mut().filter(|ws| !ws.is_finalized()) {
            ws.finalize()?;
        }
        Ok(())
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(Error::InvalidSheetName(
                "Sheet name cannot start or end with an apostrophe".into(),
            ));
        }

        // case-insensitive
        let lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{CellFormat, Font};

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert!(wb.is_empty());
        assert_eq!(wb.styles().cell_formats().len(), 2);
    }

    #[test]
    fn test_add_worksheets() {
        let mut wb = Workbook::new();
        wb.add_worksheet(DEFAULT_SHEET_NAME).unwrap();
        wb.add_worksheet("Data").unwrap();
        assert_eq!(wb.sheet_count(), 2);
        assert_eq!(wb.worksheet(1).unwrap().name(), "Data");
        assert!(wb.worksheet_by_name("Sheet1").is_some());
        assert!(wb.worksheet_by_name("NonExistent").is_none());
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();
        wb.add_worksheet("Sheet1").unwrap();

        assert!(matches!(
            wb.add_worksheet("SHEET1"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert!(wb.add_worksheet("sheet1").is_err());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet("").is_err());
        assert!(wb.add_worksheet("Sheet/1").is_err());
        assert!(wb.add_worksheet("Sheet:1").is_err());
        assert!(wb.add_worksheet("Sheet[1]").is_err());
        assert!(wb.add_worksheet("'quoted'").is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(matches!(
            wb.add_worksheet(&long_name),
            Err(Error::InvalidSheetName(_))
        ));
        assert!(wb.is_empty());
    }

    #[test]
    fn test_styles_shared_across_sheets() {
        let mut wb = Workbook::new();
        let font = wb.styles_mut().register_font(Font::new().with_bold(true));
        let bold = wb
            .styles_mut()
            .register_cell_format(CellFormat::new().font(font))
            .unwrap();

        wb.add_worksheet("A")
            .unwrap()
            .append_row(1, None)
            .unwrap()
            .append_cell(1, "x", Some(bold))
            .unwrap();
        wb.add_worksheet("B").unwrap();
        wb.finalize().unwrap();

        assert!(wb.worksheets().all(Worksheet::is_finalized));
        assert!(wb.styles().has_cell_format(bold));
    }
}
