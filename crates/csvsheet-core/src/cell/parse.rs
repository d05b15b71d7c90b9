//! Coercion of raw text fields into typed cell values

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;

use super::CellValue;

/// Target type declared for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnKind {
    /// Keep the field as text
    #[default]
    Text,
    /// Parse as a decimal number
    Decimal,
    /// Parse as a date (and optional time of day)
    Date,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnKind::Text => "text",
            ColumnKind::Decimal => "decimal",
            ColumnKind::Date => "date",
        })
    }
}

/// How raw fields are coerced
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Decimal separator (default: `.`)
    pub decimal_separator: Option<String>,
    /// Exact `strftime`-style date pattern; when unset a fixed list of
    /// invariant patterns is tried
    pub date_format: Option<String>,
    /// Report unparseable non-empty fields instead of leaving the cell empty
    pub strict: bool,
}

/// A non-empty field that did not match its column's grammar (strict mode only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{input}' as {kind}")]
pub struct CellParseError {
    /// The raw field
    pub input: String,
    /// The kind it was parsed as
    pub kind: ColumnKind,
}

// Date-times first so a time of day is never silently dropped.
const DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

impl CellValue {
    /// Coerce a raw field into a value of the declared kind
    ///
    /// Missing or empty input is always [`CellValue::Empty`] for decimal and
    /// date columns. Input that fails to parse is also `Empty`, unless
    /// `options.strict` is set, in which case it is reported.
    pub fn parse(
        raw: Option<&str>,
        kind: ColumnKind,
        options: &ParseOptions,
    ) -> Result<CellValue, CellParseError> {
        let raw = match raw {
            Some(raw) => raw,
            None => return Ok(CellValue::Empty),
        };

        let parsed = match kind {
            ColumnKind::Text => return Ok(CellValue::text(raw)),
            _ if raw.is_empty() => return Ok(CellValue::Empty),
            ColumnKind::Decimal => {
                parse_decimal(raw, options.decimal_separator.as_deref()).map(CellValue::Number)
            }
            ColumnKind::Date => {
                parse_date(raw, options.date_format.as_deref()).map(CellValue::Date)
            }
        };

        match parsed {
            Some(value) => Ok(value),
            None if options.strict => Err(CellParseError {
                input: raw.to_string(),
                kind,
            }),
            None => Ok(CellValue::Empty),
        }
    }
}

/// Parse a decimal number written with the given separator
///
/// Accepts surrounding whitespace, one leading or trailing sign, accounting
/// parentheses for negatives, and `,` digit grouping in the integer part
/// (unless `,` is itself the decimal separator). With a separator other
/// than `.`, a value without that separator may still use `.` as its
/// decimal point.
pub fn parse_decimal(input: &str, separator: Option<&str>) -> Option<Decimal> {
    let separator = separator.filter(|s| !s.is_empty()).unwrap_or(".");
    let group = if separator == "," { None } else { Some(",") };

    let mut s = input.trim();
    let mut negative = false;

    if let Some(inner) = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        negative = true;
        s = inner.trim();
    } else if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest.trim_start();
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest.trim_start();
    } else if let Some(rest) = s.strip_suffix('-') {
        negative = true;
        s = rest.trim_end();
    } else if let Some(rest) = s.strip_suffix('+') {
        s = rest.trim_end();
    }

    // `.` stays an alternate decimal point when another separator is set
    let (int_part, frac_part) = match s.split_once(separator) {
        Some((i, f)) => (i, f),
        None if separator != "." => s.split_once('.').unwrap_or((s, "")),
        None => (s, ""),
    };

    let int_digits: String = match group {
        Some(g) => int_part.replace(g, ""),
        None => int_part.to_string(),
    };

    if !int_digits.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
        || int_digits.len() + frac_part.len() == 0
    {
        return None;
    }

    let int_digits = if int_digits.is_empty() { "0".to_string() } else { int_digits };
    let canonical = if frac_part.is_empty() {
        int_digits
    } else {
        format!("{int_digits}.{frac_part}")
    };
    let value = Decimal::from_str(&canonical).ok()?;

    Some(if negative { -value } else { value })
}

/// Parse a date, exactly against `format` when given
///
/// Date-only formats and patterns yield midnight. Without a format, RFC 3339
/// is tried first (keeping the wall-clock time as written), then ISO and
/// US-style patterns.
pub fn parse_date(input: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    if let Some(format) = format.filter(|f| !f.is_empty()) {
        return parse_with(input, format)
            .or_else(|| parse_date_only_with(input, format));
    }

    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    DATETIME_PATTERNS
        .iter()
        .find_map(|p| parse_with(s, p))
        .or_else(|| DATE_PATTERNS.iter().find_map(|p| parse_date_only_with(s, p)))
}

fn parse_with(s: &str, pattern: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, pattern).ok()
}

fn parse_date_only_with(s: &str, pattern: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(s, pattern)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
