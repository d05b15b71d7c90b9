//! CSV to XLSX conversion
//!
//! Typed rows from [`CsvReader`] are laid out top to bottom on a single
//! worksheet, one cell per value starting at column A, then the finalized
//! workbook goes to [`XlsxWriter`].

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use csvsheet_core::{CancelFlag, CellValue, Workbook, DATE_CELL_FORMAT, DEFAULT_SHEET_NAME};
use csvsheet_csv::{CsvError, CsvReader, IngestOptions, TypedRow};
use csvsheet_xlsx::XlsxWriter;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Options for a conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// How the delimited input is read and typed
    pub ingest: IngestOptions,
}

impl ConvertOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ingestion options
    pub fn with_ingest(mut self, ingest: IngestOptions) -> Self {
        self.ingest = ingest;
        self
    }
}

/// Statistics from a completed conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Rows written, header included
    pub rows: usize,
    /// Header width
    pub columns: usize,
    /// Cells holding a number
    pub numbers: usize,
    /// Cells holding a date
    pub dates: usize,
}

/// Outcome of a conversion that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Output was written
    Completed(ConvertStats),
    /// The cancel flag was raised; nothing was written
    Cancelled,
}

impl Conversion {
    /// Whether the conversion was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Conversion::Cancelled)
    }
}

/// Build a finalized single-sheet workbook from typed rows
///
/// Each row is appended directly below the previous one and each value
/// directly right of the previous one. Date values get the default date
/// cell format.
pub fn build_workbook<I>(rows: I) -> csvsheet_core::Result<Workbook>
where
    I: IntoIterator<Item = TypedRow>,
{
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet(DEFAULT_SHEET_NAME)?;

    for values in rows {
        let row = sheet.append_row(1, None)?;
        for value in values {
            let style = match value {
                CellValue::Date(_) => Some(DATE_CELL_FORMAT),
                _ => None,
            };
            row.append_cell(1, value, style)?;
        }
    }

    workbook.finalize()?;
    Ok(workbook)
}

/// Convert delimited text from `reader` into an XLSX package on `writer`
///
/// Cancellation is checked once per input record and once more before the
/// package is written. A cancelled conversion writes nothing.
pub fn convert<R, W>(
    reader: R,
    writer: W,
    options: &ConvertOptions,
    cancel: &CancelFlag,
) -> Result<Conversion>
where
    R: Read,
    W: Write + Seek,
{
    let rows = match CsvReader::read(reader, &options.ingest, cancel) {
        Ok(rows) => rows,
        Err(CsvError::Cancelled) => return Ok(Conversion::Cancelled),
        Err(e) => return Err(e.into()),
    };
    if cancel.is_cancelled() {
        return Ok(Conversion::Cancelled);
    }

    let stats = stats_for(&rows);
    let workbook = build_workbook(rows)?;
    debug!(rows = stats.rows, columns = stats.columns, "workbook built");

    XlsxWriter::write(&workbook, writer)?;
    Ok(Conversion::Completed(stats))
}

/// Convert a CSV file into an XLSX file
///
/// Without an explicit output path the input path with an `xlsx` extension
/// is used. The package is written to a temporary file beside the output and
/// moved into place only once complete, so a failed or cancelled conversion
/// leaves no output behind.
pub fn convert_file<P: AsRef<Path>>(
    csv_path: P,
    xlsx_path: Option<&Path>,
    options: &ConvertOptions,
    cancel: &CancelFlag,
) -> Result<Conversion> {
    let csv_path = csv_path.as_ref();
    let output = xlsx_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(csv_path));
    if is_same_file(csv_path, &output)? {
        return Err(Error::OutputIsInput(output));
    }

    let input = BufReader::new(File::open(csv_path)?);
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    debug!(
        input = %csv_path.display(),
        staged = %staged.path().display(),
        "converting"
    );

    let conversion = convert(input, staged.as_file_mut(), options, cancel)?;
    match conversion {
        Conversion::Completed(stats) => {
            staged.persist(&output)?;
            info!(
                input = %csv_path.display(),
                output = %output.display(),
                rows = stats.rows,
                columns = stats.columns,
                "conversion complete"
            );
        }
        Conversion::Cancelled => {
            info!(input = %csv_path.display(), "conversion cancelled, no output written");
        }
    }
    Ok(conversion)
}

/// The input path with its extension replaced by `xlsx`
pub fn default_output_path<P: AsRef<Path>>(csv_path: P) -> PathBuf {
    csv_path.as_ref().with_extension("xlsx")
}

/// Whether `output` resolves to the existing `input` file
///
/// The output may not exist yet, so its parent is resolved and joined with
/// its file name.
fn is_same_file(input: &Path, output: &Path) -> io::Result<bool> {
    let input = input.canonicalize()?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let (Ok(parent), Some(name)) = (parent.canonicalize(), output.file_name()) else {
        return Ok(false);
    };
    Ok(parent.join(name) == input)
}

fn stats_for(rows: &[TypedRow]) -> ConvertStats {
    let mut stats = ConvertStats {
        rows: rows.len(),
        columns: rows.first().map_or(0, Vec::len),
        ..ConvertStats::default()
    };
    for value in rows.iter().flatten() {
        match value {
            CellValue::Number(_) => stats.numbers += 1,
            CellValue::Date(_) => stats.dates += 1,
            CellValue::Empty | CellValue::Text(_) => {}
        }
    }
    stats
}
