//! Cell value types

use std::borrow::Cow;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use rust_decimal::{Decimal, RoundingStrategy};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Day zero of the serial date system (OLE automation dates)
static SERIAL_EPOCH: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("serial date epoch")
});

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    /// Empty cell (written as an empty inline string)
    #[default]
    Empty,

    /// Text value
    Text(String),

    /// Decimal value, written with exactly two fraction digits
    Number(Decimal),

    /// Date and time, written as a serial day number
    Date(NaiveDateTime),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Whether the serialized form is numeric (`<v>`) rather than inline text
    pub fn is_numeric(&self) -> bool {
        match self {
            CellValue::Number(_) | CellValue::Date(_) => true,
            CellValue::Empty | CellValue::Text(_) => false,
        }
    }

    /// The text a spreadsheet cell stores for this value
    ///
    /// Numbers and dates use `.` as the decimal point and never group digits.
    pub fn serialized(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s),
            CellValue::Number(d) => Cow::Owned(format_number(*d)),
            CellValue::Date(dt) => Cow::Owned(serial_date(*dt).to_string()),
        }
    }
}

/// Render a decimal in `0.00` form, rounding half away from zero
pub fn format_number(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Days (with fractional time of day) since 1899-12-30, at millisecond resolution
///
/// Date-times before the epoch keep the integral day negative and the time of
/// day positive, so 1899-12-29 06:00 is -1.25 rather than -0.75.
pub fn serial_date(value: NaiveDateTime) -> f64 {
    let mut millis = (value - *SERIAL_EPOCH).num_milliseconds();
    if millis < 0 {
        let frac = millis % MILLIS_PER_DAY;
        if frac != 0 {
            millis -= (MILLIS_PER_DAY + frac) * 2;
        }
    }
    millis as f64 / MILLIS_PER_DAY as f64
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(d) => f.write_str(&format_number(*d)),
            CellValue::Date(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<Decimal> for CellValue {
    fn from(d: Decimal) -> Self {
        CellValue::Number(d)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(Decimal::from(n))
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(CellValue::Empty, Into::into)
    }
}
