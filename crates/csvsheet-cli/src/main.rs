//! csvsheet CLI - converts a CSV file into an XLSX workbook

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use csvsheet::address::label_to_column_id;
use csvsheet::prelude::*;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Exit status for a conversion stopped by Ctrl-C
const EXIT_CANCELLED: u8 = 1;
/// Exit status for a conversion that failed
const EXIT_FAILED: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "csvsheet")]
#[command(
    author,
    version,
    about = "Convert a CSV file into an XLSX workbook with typed columns"
)]
struct Cli {
    /// Input CSV file (first record is the header)
    #[arg(value_name = "CSV")]
    input: PathBuf,

    /// Output XLSX file (default: the input path with an .xlsx extension)
    #[arg(value_name = "XLSX")]
    output: Option<PathBuf>,

    /// Columns holding decimals, by label (e.g. B or B,D)
    #[arg(short = 'd', long = "decimal-columns", value_name = "COL", value_delimiter = ',', value_parser = parse_column)]
    decimal_columns: Vec<String>,

    /// Decimal separator used in the input (default: .)
    #[arg(short = 's', long = "decimal-separator", value_name = "SEP")]
    decimal_separator: Option<String>,

    /// Columns holding dates, by label
    #[arg(short = 't', long = "date-columns", value_name = "COL", value_delimiter = ',', value_parser = parse_column)]
    date_columns: Vec<String>,

    /// Exact date format, strftime style (e.g. %d.%m.%Y)
    #[arg(short = 'f', long = "date-format", value_name = "FMT")]
    date_format: Option<String>,

    /// Field delimiter
    #[arg(long, value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Fail on values that cannot be parsed instead of leaving them empty
    #[arg(long)]
    strict: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        let mut ingest = IngestOptions::new().delimiter(self.delimiter).strict(self.strict);
        for label in &self.decimal_columns {
            ingest = ingest.decimal_column(label.as_str());
        }
        for label in &self.date_columns {
            ingest = ingest.date_column(label.as_str());
        }
        if let Some(sep) = &self.decimal_separator {
            ingest = ingest.decimal_separator(sep.as_str());
        }
        if let Some(fmt) = &self.date_format {
            ingest = ingest.date_format(fmt.as_str());
        }
        ConvertOptions::new().with_ingest(ingest)
    }
}

/// Accept a column label in any case, normalized to uppercase
fn parse_column(s: &str) -> std::result::Result<String, String> {
    let label = s.trim().to_ascii_uppercase();
    label_to_column_id(&label).map_err(|e| e.to_string())?;
    Ok(label)
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if s == "\\t" || s == "tab" => Ok(b'\t'),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(Conversion::Completed(_)) => ExitCode::SUCCESS,
        Ok(Conversion::Cancelled) => {
            eprintln!("Cancelled, no output written");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FAILED)
        }
    }
}

async fn run(cli: Cli) -> Result<Conversion> {
    let options = cli.convert_options();
    let cancel = CancelFlag::new();

    let listener = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping");
            listener.cancel();
        }
    });

    let input = cli.input;
    let output = cli.output;
    let outcome = tokio::task::spawn_blocking(move || {
        convert_file(&input, output.as_deref(), &options, &cancel)
            .with_context(|| format!("Failed to convert '{}'", input.display()))
            .map(|outcome| report(&input, output.as_deref(), outcome))
    })
    .await
    .context("Conversion task failed")??;

    Ok(outcome)
}

fn report(input: &Path, output: Option<&Path>, outcome: Conversion) -> Conversion {
    if let Conversion::Completed(stats) = &outcome {
        let written = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| csvsheet::default_output_path(input));
        eprintln!(
            "Wrote {} rows x {} columns to {}",
            stats.rows,
            stats.columns,
            written.display()
        );
    }
    outcome
}
