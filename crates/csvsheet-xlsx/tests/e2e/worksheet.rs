//! Worksheet part contents.

use super::*;
use chrono::NaiveDate;
use csvsheet_core::{CellValue, Workbook, DATE_CELL_FORMAT, DEFAULT_SHEET_NAME};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn sheet_xml(build: impl FnOnce(&mut csvsheet_core::Worksheet)) -> String {
    let mut wb = Workbook::new();
    build(wb.add_worksheet(DEFAULT_SHEET_NAME).unwrap());
    wb.finalize().unwrap();
    read_part(&package(&wb), "xl/worksheets/sheet1.xml")
}

#[test]
fn test_empty_sheet() {
    let xml = sheet_xml(|_| {});
    assert_eq!(root_children(&xml), vec!["sheetData"]);
}

#[test]
fn test_children_in_schema_order() {
    let xml = sheet_xml(|ws| {
        ws.append_column_width(1, 1, 20.0).unwrap();
        ws.append_row(1, None)
            .unwrap()
            .append_cell(1, "a", None)
            .unwrap()
            .append_cell(1, "b", None)
            .unwrap();
        ws.append_relative_merged_range(1, 2).unwrap();
        ws.append_relative_row_break(1).unwrap();
        ws.append_relative_column_break(1).unwrap();
    });
    assert_eq!(
        root_children(&xml),
        vec![
            "dimension",
            "cols",
            "sheetData",
            "mergeCells",
            "rowBreaks",
            "colBreaks",
            "ignoredErrors",
        ]
    );
    assert_eq!(attribute_values(&xml, "mergeCell", "ref"), vec!["B1:C1"]);
    // row break before row 2, column break before column C
    assert_eq!(attribute_values(&xml, "brk", "id"), vec!["1", "2"]);
}

#[test]
fn test_only_present_collections_are_written() {
    let xml = sheet_xml(|ws| {
        ws.append_row(1, None).unwrap().append_cell(1, "x", None).unwrap();
        ws.append_row_break(3).unwrap();
    });
    assert_eq!(
        root_children(&xml),
        vec!["dimension", "sheetData", "rowBreaks", "ignoredErrors"]
    );
}

#[test]
fn test_typed_rows() {
    let when = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let xml = sheet_xml(|ws| {
        ws.append_row(1, None)
            .unwrap()
            .append_cell(1, "h1", None)
            .unwrap()
            .append_cell(1, "h2", None)
            .unwrap()
            .append_cell(1, "h3", None)
            .unwrap();
        ws.append_row(1, None)
            .unwrap()
            .append_cell(1, "x", None)
            .unwrap()
            .append_cell(1, CellValue::Number(Decimal::new(35, 1)), None)
            .unwrap()
            .append_cell(1, CellValue::Date(when), Some(DATE_CELL_FORMAT))
            .unwrap();
        ws.append_row(1, None)
            .unwrap()
            .append_cell(1, "y", None)
            .unwrap()
            .append_cell(1, CellValue::Number(Decimal::new(7, 0)), None)
            .unwrap()
            .append_cell(1, CellValue::Empty, None)
            .unwrap();
    });

    assert_eq!(cell_text(&xml, "A1").as_deref(), Some("h1"));
    assert_eq!(cell_text(&xml, "B2").as_deref(), Some("3.50"));
    assert_eq!(cell_text(&xml, "B3").as_deref(), Some("7.00"));
    assert_eq!(cell_text(&xml, "C2").as_deref(), Some("45366.5"));
    assert_eq!(cell_text(&xml, "C3").as_deref(), Some(""));
    assert_eq!(cell_text(&xml, "D1"), None);

    assert_eq!(attribute_values(&xml, "dimension", "ref"), vec!["A1:C3"]);
    assert_eq!(attribute_values(&xml, "ignoredError", "sqref"), vec!["A1:C3"]);
    assert_eq!(attribute_values(&xml, "c", "s"), vec!["1"]);
    assert_eq!(attribute_values(&xml, "row", "r"), vec!["1", "2", "3"]);
}

#[test]
fn test_sparse_rows_and_cells() {
    let xml = sheet_xml(|ws| {
        ws.append_row(2, None)
            .unwrap()
            .append_cell(1, "a", None)
            .unwrap()
            .append_cell(3, "c", None)
            .unwrap();
        ws.append_row(3, None).unwrap();
    });
    assert_eq!(attribute_values(&xml, "row", "r"), vec!["2", "5"]);
    assert_eq!(attribute_values(&xml, "c", "r"), vec!["A2", "D2"]);
    assert_eq!(attribute_values(&xml, "dimension", "ref"), vec!["A1:D2"]);
}

#[test]
fn test_text_is_escaped() {
    let xml = sheet_xml(|ws| {
        ws.append_row(1, None)
            .unwrap()
            .append_cell(1, "<tag> & \"quotes\"", None)
            .unwrap()
            .append_cell(1, "  padded  ", None)
            .unwrap();
    });
    assert_eq!(cell_text(&xml, "A1").as_deref(), Some("<tag> & \"quotes\""));
    assert_eq!(cell_text(&xml, "B1").as_deref(), Some("  padded  "));
}
