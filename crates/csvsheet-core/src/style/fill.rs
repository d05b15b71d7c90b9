//! Fill/background types

use super::Color;

/// Fill for cell backgrounds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    /// No fill (transparent)
    #[default]
    None,

    /// Solid color fill
    Solid { color: Color },

    /// Pattern fill
    Pattern {
        pattern: PatternType,
        foreground: Option<Color>,
        background: Option<Color>,
    },
}

impl Fill {
    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        Fill::Solid { color }
    }

    /// Create a pattern fill without colors
    pub fn pattern(pattern: PatternType) -> Self {
        Fill::Pattern {
            pattern,
            foreground: None,
            background: None,
        }
    }

    /// The 12.5% gray fill every stylesheet carries at index 1
    pub fn gray125() -> Self {
        Self::pattern(PatternType::Gray125)
    }
}

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternType {
    /// No pattern
    #[default]
    None,
    /// Solid (100% foreground)
    Solid,
    /// 50% gray
    MediumGray,
    /// 75% gray
    DarkGray,
    /// 25% gray
    LightGray,
    /// Thin horizontal stripe
    LightHorizontal,
    /// Thin vertical stripe
    LightVertical,
    /// Thin grid
    LightGrid,
    /// 12.5% gray
    Gray125,
    /// 6.25% gray
    Gray0625,
}

impl PatternType {
    /// Attribute value in the stylesheet
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::None => "none",
            PatternType::Solid => "solid",
            PatternType::MediumGray => "mediumGray",
            PatternType::DarkGray => "darkGray",
            PatternType::LightGray => "lightGray",
            PatternType::LightHorizontal => "lightHorizontal",
            PatternType::LightVertical => "lightVertical",
            PatternType::LightGrid => "lightGrid",
            PatternType::Gray125 => "gray125",
            PatternType::Gray0625 => "gray0625",
        }
    }
}
