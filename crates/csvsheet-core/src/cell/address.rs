//! Column labels, cell references and ranges
//!
//! Naming used throughout the crate:
//! - column id: zero-based integer (A = 0)
//! - column label: one to three capital letters (A to ZZZ)
//! - row index: one-based integer
//! - cell reference: label followed by row index, e.g. `B12`

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::MAX_ROWS;

/// Highest column id that still has a label (`ZZZ`)
pub const MAX_COLUMN_ID: u32 = 18_277;

/// Longest supported column label
pub const MAX_LABEL_LEN: usize = 3;

const PLACE_VALUES: [u32; MAX_LABEL_LEN] = [1, 26, 26 * 26];

static CELL_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{1,3})(\d{1,7})$").expect("cell reference pattern"));

/// Convert a column id to its label (0 = A, 25 = Z, 26 = AA, ..., 18277 = ZZZ)
///
/// Labels are bijective base-26 numerals: digits run from 1 (`A`) to 26 (`Z`)
/// and there is no zero digit.
///
/// # Examples
/// ```
/// use csvsheet_core::cell::column_id_to_label;
///
/// assert_eq!(column_id_to_label(0).unwrap(), "A");
/// assert_eq!(column_id_to_label(26).unwrap(), "AA");
/// assert!(column_id_to_label(18_278).is_err());
/// ```
pub fn column_id_to_label(id: u32) -> Result<String> {
    if id > MAX_COLUMN_ID {
        return Err(Error::OutOfRange(format!("column id {id}")));
    }
    let mut label = String::with_capacity(MAX_LABEL_LEN);
    push_label(id, &mut label);
    Ok(label)
}

/// Convert a column label back to its id
///
/// Exact left inverse of [`column_id_to_label`]. Labels must be uppercase.
pub fn label_to_column_id(label: &str) -> Result<u32> {
    if label.len() > MAX_LABEL_LEN {
        return Err(Error::OutOfRange(format!("column label '{label}'")));
    }
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(Error::InvalidReference(label.to_string()));
    }

    let len = label.len();
    let sum: u32 = label
        .bytes()
        .enumerate()
        .map(|(i, b)| PLACE_VALUES[len - i - 1] * u32::from(b - b'A' + 1))
        .sum();

    Ok(sum - 1)
}

/// Split a cell reference into its row index and column label
///
/// # Examples
/// ```
/// use csvsheet_core::cell::parse_cell_reference;
///
/// assert_eq!(parse_cell_reference("B12").unwrap(), (12, "B".to_string()));
/// assert!(parse_cell_reference("1B").is_err());
/// ```
pub fn parse_cell_reference(reference: &str) -> Result<(u32, String)> {
    let caps = CELL_REFERENCE
        .captures(reference)
        .ok_or_else(|| Error::InvalidReference(reference.to_string()))?;

    // at most seven digits, always fits
    let row = caps[2]
        .parse::<u32>()
        .map_err(|_| Error::InvalidReference(reference.to_string()))?;

    Ok((row, caps[1].to_string()))
}

// Caller guarantees `id <= MAX_COLUMN_ID`.
fn push_label(id: u32, out: &mut String) {
    let mut buf = [0u8; MAX_LABEL_LEN];
    let mut pos = MAX_LABEL_LEN;
    let mut n = id + 1;

    while n > 0 {
        n -= 1;
        pos -= 1;
        buf[pos] = b'A' + (n % 26) as u8;
        n /= 26;
    }

    for &b in &buf[pos..] {
        out.push(b as char);
    }
}

/// A validated cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    row: u32,
    col: u32,
}

impl CellRef {
    /// Create a reference from a one-based row index and zero-based column id
    pub fn new(row: u32, col: u32) -> Result<Self> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::OutOfRange(format!("row index {row}")));
        }
        if col > MAX_COLUMN_ID {
            return Err(Error::OutOfRange(format!("column id {col}")));
        }
        Ok(Self { row, col })
    }

    /// Parse an A1-style reference
    pub fn parse(s: &str) -> Result<Self> {
        let (row, label) = parse_cell_reference(s)?;
        let col = label_to_column_id(&label)?;
        if row == 0 {
            return Err(Error::InvalidReference(s.to_string()));
        }
        Self::new(row, col)
    }

    /// One-based row index
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column id
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Column label
    pub fn label(&self) -> String {
        let mut s = String::with_capacity(MAX_LABEL_LEN);
        push_label(self.col, &mut s);
        s
    }

    /// Reference `rows` below and `cols` to the right of this one
    pub fn offset(&self, rows: u32, cols: u32) -> Result<Self> {
        let row = self
            .row
            .checked_add(rows)
            .ok_or_else(|| Error::OutOfRange(format!("row index {} + {rows}", self.row)))?;
        let col = self
            .col
            .checked_add(cols)
            .ok_or_else(|| Error::OutOfRange(format!("column id {} + {cols}", self.col)))?;
        Self::new(row, col)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label(), self.row)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1:C5")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellRef,
    /// Bottom-right corner
    pub end: CellRef,
}

impl CellRange {
    /// Create a range, normalizing the corners to top-left / bottom-right
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            start: CellRef {
                row: a.row.min(b.row),
                col: a.col.min(b.col),
            },
            end: CellRef {
                row: a.row.max(b.row),
                col: a.col.max(b.col),
            },
        }
    }

    /// Parse `A1:B2` (or a single reference)
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((a, b)) => Ok(Self::new(CellRef::parse(a)?, CellRef::parse(b)?)),
            None => {
                let r = CellRef::parse(s)?;
                Ok(Self::new(r, r))
            }
        }
    }

    /// Number of rows covered
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Number of columns covered
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_id_to_label() {
        assert_eq!(column_id_to_label(0).unwrap(), "A");
        assert_eq!(column_id_to_label(1).unwrap(), "B");
        assert_eq!(column_id_to_label(25).unwrap(), "Z");
        assert_eq!(column_id_to_label(26).unwrap(), "AA");
        assert_eq!(column_id_to_label(27).unwrap(), "AB");
        assert_eq!(column_id_to_label(701).unwrap(), "ZZ");
        assert_eq!(column_id_to_label(702).unwrap(), "AAA");
        assert_eq!(column_id_to_label(16383).unwrap(), "XFD");
        assert_eq!(column_id_to_label(MAX_COLUMN_ID).unwrap(), "ZZZ");
    }

    #[test]
    fn test_label_to_column_id() {
        assert_eq!(label_to_column_id("A").unwrap(), 0);
        assert_eq!(label_to_column_id("Z").unwrap(), 25);
        assert_eq!(label_to_column_id("AA").unwrap(), 26);
        assert_eq!(label_to_column_id("AZ").unwrap(), 51);
        assert_eq!(label_to_column_id("ZZ").unwrap(), 701);
        assert_eq!(label_to_column_id("AAA").unwrap(), 702);
        assert_eq!(label_to_column_id("ZZZ").unwrap(), MAX_COLUMN_ID);
    }

    #[test]
    fn test_codec_out_of_range() {
        assert!(matches!(
            column_id_to_label(MAX_COLUMN_ID + 1),
            Err(Error::OutOfRange(_))
        ));
        assert!(matches!(
            label_to_column_id("AAAA"),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_label_rejects_garbage() {
        assert!(matches!(label_to_column_id(""), Err(Error::InvalidReference(_))));
        assert!(matches!(label_to_column_id("a"), Err(Error::InvalidReference(_))));
        assert!(matches!(label_to_column_id("A1"), Err(Error::InvalidReference(_))));
    }

    #[test]
    fn test_every_id_round_trips() {
        for id in 0..=MAX_COLUMN_ID {
            let label = column_id_to_label(id).unwrap();
            assert_eq!(label_to_column_id(&label).unwrap(), id, "label {label}");
        }
    }

    proptest! {
        #[test]
        fn label_round_trips(label in "[A-Z]{1,3}") {
            let id = label_to_column_id(&label).unwrap();
            prop_assert_eq!(column_id_to_label(id).unwrap(), label);
        }
    }

    #[test]
    fn test_parse_cell_reference() {
        assert_eq!(parse_cell_reference("B12").unwrap(), (12, "B".to_string()));
        assert_eq!(parse_cell_reference("AZ1").unwrap(), (1, "AZ".to_string()));
        assert_eq!(
            parse_cell_reference("ZZZ9999999").unwrap(),
            (9_999_999, "ZZZ".to_string())
        );
    }

    #[test]
    fn test_parse_cell_reference_errors() {
        for bad in ["", "1B", "B", "12", "b12", "AAAA1", "A12345678", " A1", "A1 ", "$A$1"] {
            assert!(
                matches!(parse_cell_reference(bad), Err(Error::InvalidReference(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_cell_ref_display_and_parse() {
        let r = CellRef::new(5, 2).unwrap();
        assert_eq!(r.to_string(), "C5");
        assert_eq!("C5".parse::<CellRef>().unwrap(), r);
        assert_eq!(r.label(), "C");

        assert!(CellRef::parse("A0").is_err());
        assert!(CellRef::new(0, 0).is_err());
        assert!(CellRef::new(MAX_ROWS + 1, 0).is_err());
    }

    #[test]
    fn test_cell_ref_offset() {
        let r = CellRef::parse("B2").unwrap();
        assert_eq!(r.offset(1, 0).unwrap().to_string(), "B3");
        assert_eq!(r.offset(0, 25).unwrap().to_string(), "AA2");
        assert!(CellRef::parse("ZZZ1").unwrap().offset(0, 1).is_err());
    }

    #[test]
    fn test_cell_range() {
        let range = CellRange::parse("C5:A1").unwrap();
        assert_eq!(range.to_string(), "A1:C5");
        assert_eq!(range.row_count(), 5);
        assert_eq!(range.col_count(), 3);

        let single = CellRange::parse("D4").unwrap();
        assert_eq!(single.to_string(), "D4:D4");
    }
}
