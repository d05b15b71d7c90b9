//! Font types

/// A font entry
///
/// Unset size and name leave the consumer's defaults in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Font {
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Size in points
    pub size: Option<f64>,
    /// Family name (e.g., "Calibri")
    pub name: Option<String>,
}

impl Font {
    /// Create a new default font
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set family name; an empty name counts as unset
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Whether this is the consumer default (no child elements)
    pub fn is_default(&self) -> bool {
        *self == Font::default()
    }
}
