//! CSV ingestion options

use std::collections::HashSet;

use csvsheet_core::cell::label_to_column_id;
use csvsheet_core::{ColumnKind, ParseOptions};

use crate::error::CsvResult;

/// Options for reading CSV input into typed rows
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Labels of columns parsed as decimals (e.g. "B", "AA")
    pub decimal_columns: Vec<String>,
    /// Labels of columns parsed as dates
    pub date_columns: Vec<String>,
    /// Decimal separator for decimal columns (default: `.`)
    pub decimal_separator: Option<String>,
    /// Exact date pattern for date columns
    pub date_format: Option<String>,
    /// Fail on unparseable fields instead of leaving them empty
    pub strict: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            decimal_columns: Vec::new(),
            date_columns: Vec::new(),
            decimal_separator: None,
            date_format: None,
            strict: false,
        }
    }
}

impl IngestOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse the column with this label as a decimal
    pub fn decimal_column<S: Into<String>>(mut self, label: S) -> Self {
        self.decimal_columns.push(label.into());
        self
    }

    /// Parse the column with this label as a date
    pub fn date_column<S: Into<String>>(mut self, label: S) -> Self {
        self.date_columns.push(label.into());
        self
    }

    /// Set the decimal separator
    pub fn decimal_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.decimal_separator = Some(separator.into());
        self
    }

    /// Set the exact date pattern
    pub fn date_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Enable strict mode
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Field coercion settings
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            decimal_separator: self.decimal_separator.clone(),
            date_format: self.date_format.clone(),
            strict: self.strict,
        }
    }

    /// Translate the column selectors to ids
    pub fn column_kinds(&self) -> CsvResult<ColumnKinds> {
        Ok(ColumnKinds {
            decimal: resolve(&self.decimal_columns)?,
            date: resolve(&self.date_columns)?,
        })
    }
}

fn resolve(labels: &[String]) -> CsvResult<HashSet<u32>> {
    labels
        .iter()
        .map(|label| label_to_column_id(label).map_err(Into::into))
        .collect()
}

/// Declared kind per column id
#[derive(Debug, Clone, Default)]
pub struct ColumnKinds {
    decimal: HashSet<u32>,
    date: HashSet<u32>,
}

impl ColumnKinds {
    /// Kind of column `id`; decimal wins over date when both are declared
    pub fn kind_of(&self, id: u32) -> ColumnKind {
        if self.decimal.contains(&id) {
            ColumnKind::Decimal
        } else if self.date.contains(&id) {
            ColumnKind::Date
        } else {
            ColumnKind::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsvError;

    #[test]
    fn test_column_kinds() {
        let kinds = IngestOptions::new()
            .decimal_column("B")
            .date_column("B")
            .date_column("AA")
            .column_kinds()
            .unwrap();
        assert_eq!(kinds.kind_of(0), ColumnKind::Text);
        assert_eq!(kinds.kind_of(1), ColumnKind::Decimal);
        assert_eq!(kinds.kind_of(26), ColumnKind::Date);
    }

    #[test]
    fn test_invalid_selector() {
        let err = IngestOptions::new()
            .decimal_column("AAAA")
            .column_kinds()
            .unwrap_err();
        assert!(matches!(err, CsvError::Core(csvsheet_core::Error::OutOfRange(_))));

        assert!(IngestOptions::new().date_column("b").column_kinds().is_err());
    }

    #[test]
    fn test_parse_options() {
        let opts = IngestOptions::new()
            .decimal_separator(",")
            .date_format("%d.%m.%Y")
            .strict(true)
            .parse_options();
        assert_eq!(opts.decimal_separator.as_deref(), Some(","));
        assert_eq!(opts.date_format.as_deref(), Some("%d.%m.%Y"));
        assert!(opts.strict);
    }
}
