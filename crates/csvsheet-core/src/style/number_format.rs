//! Number format types

/// Number format id bound to the default date pattern
pub const DATE_FORMAT_ID: u32 = 165;

/// Default date pattern (day.month.two-digit-year)
pub const DATE_FORMAT_CODE: &str = r"[$]dd\.mm\.yy;@";

/// Highest number format id consumers treat as built-in
pub const MAX_BUILTIN_ID: u32 = 163;

/// Id handed to the first number format registered after the defaults
pub const FIRST_CUSTOM_ID: u32 = DATE_FORMAT_ID + 1;

/// A custom number format
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    /// Format id referenced by cell formats
    pub id: u32,
    /// Format code
    pub code: String,
}

impl NumberFormat {
    /// Create a number format
    pub fn new<S: Into<String>>(id: u32, code: S) -> Self {
        Self {
            id,
            code: code.into(),
        }
    }

    /// The pre-registered date format
    pub fn default_date() -> Self {
        Self::new(DATE_FORMAT_ID, DATE_FORMAT_CODE)
    }

    /// Whether `id` names a format consumers know without a definition
    pub fn is_builtin(id: u32) -> bool {
        id <= MAX_BUILTIN_ID
    }
}
