//! Stylesheet (`xl/styles.xml`) serialization

use csvsheet_core::{CellFormat, Color, Fill, Font, StyleTable};
use quick_xml::escape::escape;

/// Render the style table as a stylesheet part
///
/// Table indices are written unchanged, so a cell's style index is also its
/// `cellXfs` position.
pub(crate) fn styles_xml(table: &StyleTable) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    let numfmts = table.number_formats();
    if !numfmts.is_empty() {
        xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
        for fmt in numfmts {
            xml.push_str(&format!(
                "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                fmt.id,
                escape(fmt.code.as_str())
            ));
        }
        xml.push_str("\n  </numFmts>");
    }

    // Fonts
    xml.push_str(&format!("\n  <fonts count=\"{}\">", table.fonts().len()));
    for font in table.fonts() {
        xml.push_str("\n    ");
        xml.push_str(&write_font(font));
    }
    xml.push_str("\n  </fonts>");

    // Fills
    xml.push_str(&format!("\n  <fills count=\"{}\">", table.fills().len()));
    for fill in table.fills() {
        xml.push_str("\n    ");
        xml.push_str(&write_fill(fill));
    }
    xml.push_str("\n  </fills>");

    // one default border, always
    xml.push_str(
        r#"
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
    );

    // cellXfs
    xml.push_str(&format!(
        "\n  <cellXfs count=\"{}\">",
        table.cell_formats().len()
    ));
    for format in table.cell_formats() {
        xml.push_str("\n    ");
        xml.push_str(&write_xf(format));
    }
    xml.push_str("\n  </cellXfs>");

    xml.push_str(
        r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
    );
    xml
}

fn write_color(tag: &str, color: &Color) -> String {
    format!("<{tag} rgb=\"{}\"/>", color.to_argb_hex())
}

fn write_font(font: &Font) -> String {
    if font.is_default() {
        return "<font/>".to_string();
    }
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    if let Some(size) = font.size {
        s.push_str(&format!("<sz val=\"{}\"/>", size));
    }
    if let Some(name) = &font.name {
        s.push_str(&format!("<name val=\"{}\"/>", escape(name.as_str())));
    }
    s.push_str("</font>");
    s
}

fn write_fill(fill: &Fill) -> String {
    match fill {
        Fill::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        Fill::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
            write_color("fgColor", color)
        ),
        Fill::Pattern {
            pattern,
            foreground,
            background,
        } => {
            let colors: String = [
                foreground.as_ref().map(|c| write_color("fgColor", c)),
                background.as_ref().map(|c| write_color("bgColor", c)),
            ]
            .into_iter()
            .flatten()
            .collect();
            if colors.is_empty() {
                format!(
                    "<fill><patternFill patternType=\"{}\"/></fill>",
                    pattern.as_str()
                )
            } else {
                format!(
                    "<fill><patternFill patternType=\"{}\">{}</patternFill></fill>",
                    pattern.as_str(),
                    colors
                )
            }
        }
    }
}

fn write_alignment(format: &CellFormat) -> String {
    if !format.has_alignment() {
        return String::new();
    }

    let mut s = String::from("<alignment");
    if let Some(h) = format.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", h.as_str()));
    }
    if let Some(v) = format.vertical {
        s.push_str(&format!(" vertical=\"{}\"", v.as_str()));
    }
    if let Some(rotation) = format.text_rotation {
        s.push_str(&format!(" textRotation=\"{}\"", rotation));
    }
    if let Some(wrap) = format.wrap_text {
        s.push_str(&format!(" wrapText=\"{}\"", u8::from(wrap)));
    }
    s.push_str("/>");
    s
}

fn write_xf(format: &CellFormat) -> String {
    let num_fmt_id = format.number_format.unwrap_or(0);
    let font_id = format.font.unwrap_or(0);
    let fill_id = format.fill.unwrap_or(0);

    // apply flags
    let mut attrs = String::new();
    if format.number_format.is_some() {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if format.font.is_some() {
        attrs.push_str(" applyFont=\"1\"");
    }
    if format.fill.is_some() {
        attrs.push_str(" applyFill=\"1\"");
    }
    if format.has_alignment() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let mut s = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"0\" xfId=\"0\"{}",
        num_fmt_id, font_id, fill_id, attrs
    );

    let alignment_xml = write_alignment(format);
    if alignment_xml.is_empty() {
        s.push_str("/>");
    } else {
        s.push('>');
        s.push_str(&alignment_xml);
        s.push_str("</xf>");
    }
    s
}
