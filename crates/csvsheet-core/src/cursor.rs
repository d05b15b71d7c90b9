//! Position cursors for relative appends

use crate::error::{Error, Result};

/// Tracks the last position emitted along one axis
///
/// Rows count from 1 and columns from 0, so a cursor with nothing emitted
/// behaves as if it sat at `origin - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    last: Option<u32>,
    origin: u32,
    what: &'static str,
}

impl Cursor {
    /// Cursor over one-based row indices
    pub const fn rows() -> Self {
        Self {
            last: None,
            origin: 1,
            what: "row",
        }
    }

    /// Cursor over zero-based column ids
    pub const fn columns() -> Self {
        Self {
            last: None,
            origin: 0,
            what: "cell",
        }
    }

    /// Last position emitted, if any
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// Position `offset` steps past the last one
    ///
    /// An offset of 1 is the immediately following position. Does not move
    /// the cursor.
    pub fn next(&self, offset: u32) -> Result<u32> {
        if offset == 0 {
            return Err(Error::invalid_offset(self.what, 0));
        }
        let first = match self.last {
            Some(last) => u64::from(last) + 1,
            None => u64::from(self.origin),
        };
        u32::try_from(first + u64::from(offset) - 1)
            .map_err(|_| Error::OutOfRange(format!("{} offset {offset}", self.what)))
    }

    /// Check that `pos` lies strictly past the last position
    pub fn check_forward(&self, pos: u32) -> Result<()> {
        let ok = match self.last {
            Some(last) => pos > last,
            None => pos >= self.origin,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::invalid_offset(
                self.what,
                i64::from(pos) - i64::from(self.last.unwrap_or(self.origin)),
            ))
        }
    }

    /// Record `pos` as the last emitted position
    pub(crate) fn advance_to(&mut self, pos: u32) {
        debug_assert!(self.check_forward(pos).is_ok());
        self.last = Some(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_cursor_sequence() {
        let mut c = Cursor::rows();
        for expected in 1..=3 {
            let pos = c.next(1).unwrap();
            assert_eq!(pos, expected);
            c.advance_to(pos);
        }
        assert_eq!(c.next(3).unwrap(), 6);
    }

    #[test]
    fn test_column_cursor_starts_at_zero() {
        let mut c = Cursor::columns();
        assert_eq!(c.next(1).unwrap(), 0);
        assert_eq!(c.next(3).unwrap(), 2);
        c.advance_to(1);
        assert_eq!(c.next(3).unwrap(), 4);
        assert_eq!(c.last(), Some(1));
    }

    #[test]
    fn test_zero_offset_rejected() {
        assert!(matches!(
            Cursor::rows().next(0),
            Err(Error::InvalidOffset { what: "row", value: 0 })
        ));
    }

    #[test]
    fn test_check_forward() {
        let mut c = Cursor::rows();
        assert!(c.check_forward(0).is_err());
        assert!(c.check_forward(1).is_ok());
        c.advance_to(4);
        assert!(c.check_forward(4).is_err());
        assert!(c.check_forward(5).is_ok());
    }

    #[test]
    fn test_overflow_is_out_of_range() {
        let mut c = Cursor::rows();
        c.advance_to(u32::MAX);
        assert!(matches!(c.next(1), Err(Error::OutOfRange(_))));
    }
}
