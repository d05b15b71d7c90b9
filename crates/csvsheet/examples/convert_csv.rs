//! Example: build a small CSV and convert it to XLSX
//!
//! Run with `RUST_LOG=debug` to see each stage.

use std::io::Write;

use csvsheet::prelude::*;

fn main() -> Result<()> {
    let dir = std::env::temp_dir();
    let csv_path = dir.join("csvsheet-example.csv");

    let mut csv = std::fs::File::create(&csv_path)?;
    writeln!(csv, "Item;Amount;Due")?;
    writeln!(csv, "Rent;1200,00;01.03.2024")?;
    writeln!(csv, "Power;84,17;15.03.2024")?;
    writeln!(csv, "Misc;n/a;")?;
    drop(csv);

    let options = ConvertOptions::new().with_ingest(
        IngestOptions::new()
            .delimiter(b';')
            .decimal_column("B")
            .decimal_separator(",")
            .date_column("C")
            .date_format("%d.%m.%Y"),
    );

    match convert_file(&csv_path, None, &options, &CancelFlag::new())? {
        Conversion::Completed(stats) => println!(
            "Wrote {} rows ({} numbers, {} dates) to {}",
            stats.rows,
            stats.numbers,
            stats.dates,
            csvsheet::default_output_path(&csv_path).display()
        ),
        Conversion::Cancelled => println!("Cancelled"),
    }

    Ok(())
}
