//! XLSX writer

use std::borrow::Cow;
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use csvsheet_core::{CellValue, Error as CoreError, Workbook, Worksheet};
use quick_xml::escape::escape;
use tracing::debug;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::styles_xml;

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook into an in-memory package
    pub fn to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        Self::write(workbook, &mut buf)?;
        Ok(buf.into_inner())
    }

    /// Write a workbook to a writer
    ///
    /// Every worksheet must be finalized, and every cell style must name a
    /// cell format registered in the workbook's style table.
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        Self::validate(workbook)?;

        let mut zip = zip::ZipWriter::new(writer);

        // Write [Content_Types].xml
        Self::write_content_types(&mut zip, workbook)?;

        // Write _rels/.rels
        Self::write_root_rels(&mut zip)?;

        // Write xl/workbook.xml
        Self::write_workbook_xml(&mut zip, workbook)?;

        // Write xl/_rels/workbook.xml.rels
        Self::write_workbook_rels(&mut zip, workbook)?;

        // Write xl/styles.xml
        Self::write_styles_xml(&mut zip, workbook)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            Self::write_worksheet(&mut zip, sheet, i)?;
        }

        zip.finish()?;
        debug!(sheets = workbook.sheet_count(), "xlsx package written");
        Ok(())
    }

    fn validate(workbook: &Workbook) -> XlsxResult<()> {
        let styles = workbook.styles();
        for sheet in workbook.worksheets() {
            if !sheet.is_finalized() {
                return Err(XlsxError::NotFinalized(sheet.name().to_string()));
            }
            let unknown = sheet
                .rows()
                .iter()
                .flat_map(|row| row.cells())
                .filter_map(|cell| cell.style)
                .find(|&s| !styles.has_cell_format(s));
            if let Some(index) = unknown {
                return Err(CoreError::InvalidStyleIndex {
                    kind: "cell format",
                    index,
                }
                .into());
            }
        }
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // styles come after the sheets
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            workbook.sheet_count() + 1
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        let xml = styles_xml(workbook.styles());
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let content = worksheet_xml(sheet)?;
        zip.write_all(content.as_bytes())?;
        debug!(
            sheet = sheet.name(),
            bytes = content.len(),
            "worksheet part written"
        );
        Ok(())
    }
}

/// Render a finalized worksheet part
///
/// Children follow the order the schema requires: dimension, cols,
/// sheetData, mergeCells, rowBreaks, colBreaks, ignoredErrors. Collections
/// the sheet dropped at finalization are left out entirely.
pub(crate) fn worksheet_xml(sheet: &Worksheet) -> XlsxResult<String> {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    if let Some(dimension) = sheet.dimension() {
        content.push_str(&format!("\n    <dimension ref=\"{}\"/>", dimension));
    }

    if let Some(columns) = sheet.columns() {
        content.push_str("\n    <cols>");
        for col in columns {
            content.push_str(&format!(
                "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
                col.min, col.max, col.width
            ));
        }
        content.push_str("\n    </cols>");
    }

    content.push_str("\n    <sheetData>");
    for row in sheet.rows() {
        let height_attr = row
            .height()
            .map_or(String::new(), |h| format!(" ht=\"{}\" customHeight=\"1\"", h));

        if row.is_empty() {
            content.push_str(&format!(
                "\n        <row r=\"{}\"{}/>",
                row.index(),
                height_attr
            ));
            continue;
        }

        content.push_str(&format!(
            "\n        <row r=\"{}\"{}>",
            row.index(),
            height_attr
        ));
        for cell in row.cells() {
            let cell_ref = cell.reference(row.index())?;
            let style_attr = cell
                .style
                .map_or(String::new(), |s| format!(" s=\"{}\"", s));

            match &cell.value {
                CellValue::Number(_) | CellValue::Date(_) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref,
                        style_attr,
                        cell.value.serialized()
                    ));
                }
                CellValue::Text(s) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"inlineStr\">{}</c>",
                        cell_ref,
                        style_attr,
                        inline_string(s)
                    ));
                }
                CellValue::Empty => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t></t></is></c>",
                        cell_ref, style_attr
                    ));
                }
            }
        }
        content.push_str("\n        </row>");
    }
    content.push_str("\n    </sheetData>");

    if let Some(ranges) = sheet.merged_ranges() {
        content.push_str(&format!("\n    <mergeCells count=\"{}\">", ranges.len()));
        for range in ranges {
            content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
        }
        content.push_str("\n    </mergeCells>");
    }

    if let Some(breaks) = sheet.row_breaks() {
        write_breaks(&mut content, "rowBreaks", breaks);
    }
    if let Some(breaks) = sheet.column_breaks() {
        write_breaks(&mut content, "colBreaks", breaks);
    }

    if let Some(ignored) = sheet.ignored_errors() {
        content.push_str("\n    <ignoredErrors>");
        for item in ignored {
            let mut attrs = String::new();
            if item.number_stored_as_text {
                attrs.push_str(" numberStoredAsText=\"1\"");
            }
            if item.two_digit_text_year {
                attrs.push_str(" twoDigitTextYear=\"1\"");
            }
            content.push_str(&format!(
                "\n        <ignoredError sqref=\"{}\"{}/>",
                item.range, attrs
            ));
        }
        content.push_str("\n    </ignoredErrors>");
    }

    content.push_str("\n</worksheet>");
    Ok(content)
}

fn write_breaks(content: &mut String, tag: &str, breaks: &[csvsheet_core::PageBreak]) {
    let manual = breaks.iter().filter(|b| b.manual).count();
    content.push_str(&format!(
        "\n    <{} count=\"{}\" manualBreakCount=\"{}\">",
        tag,
        breaks.len(),
        manual
    ));
    for brk in breaks {
        let man = if brk.manual { " man=\"1\"" } else { "" };
        content.push_str(&format!(
            "\n        <brk id=\"{}\" max=\"{}\"{}/>",
            brk.id, brk.max, man
        ));
    }
    content.push_str(&format!("\n    </{}>", tag));
}

/// `<is><t>..</t></is>` for a text value
fn inline_string(s: &str) -> String {
    let text = escape_text(s);
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        format!("<is><t xml:space=\"preserve\">{}</t></is>", text)
    } else {
        format!("<is><t>{}</t></is>", text)
    }
}

/// Escape markup and encode characters XML 1.0 cannot carry as `_xHHHH_`
///
/// Carriage returns are encoded too since readers normalize them away, and
/// text that already looks like `_xHHHH_` gets its leading `_` encoded so it
/// reads back literally.
fn escape_text(s: &str) -> Cow<'_, str> {
    let escaped = escape(s);
    if !escaped.chars().any(is_forbidden) && !escaped.contains("_x") {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for (i, c) in escaped.char_indices() {
        if is_forbidden(c) {
            out.push_str(&format!("_x{:04X}_", c as u32));
        } else if c == '_' && starts_with_escape(&escaped[i..]) {
            out.push_str("_x005F_");
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_forbidden(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\r' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
    )
}

/// Whether `s` opens with `_x` four hex digits and `_`
fn starts_with_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b.starts_with(b"_x")
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}
