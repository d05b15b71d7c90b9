//! Column types

/// Custom width applied to a run of columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnWidth {
    /// First column (1-based, inclusive)
    pub min: u32,
    /// Last column (1-based, inclusive)
    pub max: u32,
    /// Width in character units
    pub width: f64,
}

impl ColumnWidth {
    /// Create a width entry for columns `min..=max`
    pub fn new(min: u32, max: u32, width: f64) -> Self {
        Self { min, max, width }
    }

    /// Create a width entry for a single column
    pub fn single(index: u32, width: f64) -> Self {
        Self::new(index, index, width)
    }

    /// Number of columns covered
    pub fn span(&self) -> u32 {
        self.max - self.min + 1
    }
}
