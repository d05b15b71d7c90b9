//! Package-level parts: content types, relationships, workbook, styles.

use super::*;
use csvsheet_core::{CellFormat, Fill, Font, Workbook, DEFAULT_SHEET_NAME};
use csvsheet_xlsx::{XlsxError, XlsxWriter};
use pretty_assertions::assert_eq;

fn single_sheet() -> Workbook {
    let mut wb = Workbook::new();
    wb.add_worksheet(DEFAULT_SHEET_NAME)
        .unwrap()
        .append_row(1, None)
        .unwrap()
        .append_cell(1, "hello", None)
        .unwrap();
    wb.finalize().unwrap();
    wb
}

#[test]
fn test_package_parts() {
    let bytes = package(&single_sheet());
    assert_eq!(
        part_names(&bytes),
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );
}

#[test]
fn test_sheets_and_relationships() {
    let mut wb = Workbook::new();
    wb.add_worksheet("First").unwrap();
    wb.add_worksheet("R&D").unwrap();
    wb.finalize().unwrap();
    let bytes = package(&wb);

    let workbook_xml = read_part(&bytes, "xl/workbook.xml");
    assert_eq!(
        attribute_values(&workbook_xml, "sheet", "name"),
        vec!["First", "R&D"]
    );
    assert_eq!(
        attribute_values(&workbook_xml, "sheet", "sheetId"),
        vec!["1", "2"]
    );

    let rels = read_part(&bytes, "xl/_rels/workbook.xml.rels");
    assert_eq!(
        attribute_values(&rels, "Relationship", "Target"),
        vec!["worksheets/sheet1.xml", "worksheets/sheet2.xml", "styles.xml"]
    );
    assert_eq!(
        attribute_values(&rels, "Relationship", "Id"),
        vec!["rId1", "rId2", "rId3"]
    );

    let types = read_part(&bytes, "[Content_Types].xml");
    assert_eq!(
        attribute_values(&types, "Override", "PartName"),
        vec![
            "/xl/workbook.xml",
            "/xl/styles.xml",
            "/xl/worksheets/sheet1.xml",
            "/xl/worksheets/sheet2.xml",
        ]
    );
}

#[test]
fn test_default_styles() {
    let bytes = package(&single_sheet());
    let styles = read_part(&bytes, "xl/styles.xml");

    assert_eq!(attribute_values(&styles, "numFmt", "numFmtId"), vec!["165"]);
    assert_eq!(
        attribute_values(&styles, "numFmt", "formatCode"),
        vec![r"[$]dd\.mm\.yy;@"]
    );
    assert_eq!(
        attribute_values(&styles, "patternFill", "patternType"),
        vec!["none", "gray125"]
    );
    // default, then default date
    assert_eq!(
        attribute_values(&styles, "xf", "numFmtId"),
        vec!["0", "0", "165"]
    );
}

#[test]
fn test_registered_styles() {
    let mut wb = Workbook::new();
    let font = wb.styles_mut().register_font(Font::new().with_bold(true));
    let fill = wb
        .styles_mut()
        .register_fill(Fill::solid(csvsheet_core::Color::LIGHT_GRAY));
    let header = wb
        .styles_mut()
        .register_cell_format(CellFormat::new().font(font).fill(fill))
        .unwrap();
    assert_eq!(header, 2);

    wb.add_worksheet(DEFAULT_SHEET_NAME)
        .unwrap()
        .append_row(1, None)
        .unwrap()
        .append_cell(1, "Name", Some(header))
        .unwrap();
    wb.finalize().unwrap();

    let bytes = package(&wb);
    let styles = read_part(&bytes, "xl/styles.xml");
    assert_eq!(attribute_values(&styles, "xf", "fontId"), vec!["0", "0", "0", "1"]);
    assert_eq!(attribute_values(&styles, "xf", "fillId"), vec!["0", "0", "0", "2"]);
    assert_eq!(attribute_values(&styles, "fgColor", "rgb"), vec!["FFD9D9D9"]);

    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert_eq!(attribute_values(&sheet, "c", "s"), vec!["2"]);
}

#[test]
fn test_write_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    XlsxWriter::write_file(&single_sheet(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(
        cell_text(&read_part(&bytes, "xl/worksheets/sheet1.xml"), "A1").as_deref(),
        Some("hello")
    );
}

#[test]
fn test_unfinalized_sheet_is_rejected() {
    let mut wb = Workbook::new();
    wb.add_worksheet("Open").unwrap();
    assert!(matches!(
        XlsxWriter::to_bytes(&wb),
        Err(XlsxError::NotFinalized(name)) if name == "Open"
    ));
}
