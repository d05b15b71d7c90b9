//! CSV reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csvsheet_core::cell::column_id_to_label;
use csvsheet_core::{CancelFlag, CellValue, ColumnKind};
use tracing::{debug, warn};

use crate::error::{CsvError, CsvResult};
use crate::options::IngestOptions;

/// One output row: values in column order, starting at column A
pub type TypedRow = Vec<CellValue>;

/// CSV reader producing typed rows
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into typed rows
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        options: &IngestOptions,
        cancel: &CancelFlag,
    ) -> CsvResult<Vec<TypedRow>> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading csv");
        let file = File::open(path)?;
        Self::read(BufReader::new(file), options, cancel)
    }

    /// Read CSV from a reader into typed rows
    ///
    /// The header record becomes the first row, as text. Every following
    /// row has exactly one value per header column: short records are padded
    /// with empty values and fields past the header width are dropped.
    /// Input without a header yields no rows.
    pub fn read<R: Read>(
        reader: R,
        options: &IngestOptions,
        cancel: &CancelFlag,
    ) -> CsvResult<Vec<TypedRow>> {
        let kinds = options.column_kinds()?;
        let parse_options = options.parse_options();

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() {
            debug!("no header record, nothing to convert");
            return Ok(Vec::new());
        }

        let width = headers.len();
        let column_kinds: Vec<ColumnKind> = (0..width).map(|i| kinds.kind_of(i as u32)).collect();

        let mut rows: Vec<TypedRow> = Vec::new();
        rows.push(headers.iter().map(CellValue::text).collect());

        let mut unparsed = 0usize;
        for result in csv_reader.records() {
            if cancel.is_cancelled() {
                debug!(rows = rows.len(), "ingestion cancelled");
                return Err(CsvError::Cancelled);
            }

            let record = result?;
            let row_index = rows.len() + 1;
            let mut row = Vec::with_capacity(width);

            for (i, &kind) in column_kinds.iter().enumerate() {
                let raw = record.get(i);
                let value = CellValue::parse(raw, kind, &parse_options).map_err(|e| {
                    CsvError::Parse {
                        row: row_index,
                        column: column_label(i),
                        message: e.to_string(),
                    }
                })?;

                let swallowed = value.is_empty()
                    && kind != ColumnKind::Text
                    && raw.map_or(false, |s| !s.is_empty());
                if swallowed {
                    unparsed += 1;
                    debug!(
                        row = row_index,
                        column = %column_label(i),
                        %kind,
                        "unparseable field left empty"
                    );
                }
                row.push(value);
            }

            rows.push(row);
        }

        if unparsed > 0 {
            warn!(fields = unparsed, "some fields could not be parsed and were left empty");
        }
        debug!(rows = rows.len(), columns = width, "csv ingested");
        Ok(rows)
    }
}

fn column_label(id: usize) -> String {
    u32::try_from(id)
        .ok()
        .and_then(|id| column_id_to_label(id).ok())
        .unwrap_or_else(|| format!("#{}", id + 1))
}
