//! Common utilities for E2E tests.

use std::io::{Cursor, Read};

use csvsheet_core::Workbook;
use csvsheet_xlsx::XlsxWriter;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Write a workbook and return the package bytes
pub fn package(workbook: &Workbook) -> Vec<u8> {
    XlsxWriter::to_bytes(workbook).expect("workbook should serialize")
}

/// Names of every entry in the package, in archive order
pub fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    archive.file_names().map(str::to_string).collect()
}

/// Read one part of the package as text
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut file = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"));
    let mut xml = String::new();
    file.read_to_string(&mut xml).expect("utf-8 part");
    xml
}

/// Local names of the root element's children, in document order
pub fn root_children(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut names = Vec::new();
    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) => {
                if depth == 1 {
                    names.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 1 {
                    names.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
            }
            Event::End(_) => depth -= 1,
            Event::Eof => break,
            _ => {}
        }
    }
    names
}

/// Text content of the cell at `reference` (from `<v>` or `<t>`)
///
/// `None` when the sheet has no such cell.
pub fn cell_text(xml: &str, reference: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut inside = false;
    let mut found = false;
    let mut text = String::new();
    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) if e.local_name().as_ref() == b"c" => {
                inside = attr(&e, "r").as_deref() == Some(reference);
                found |= inside;
            }
            Event::Empty(e) if e.local_name().as_ref() == b"c" => {
                if attr(&e, "r").as_deref() == Some(reference) {
                    return Some(String::new());
                }
            }
            Event::Text(t) if inside => {
                text.push_str(&t.unescape().expect("valid text"));
            }
            Event::End(e) if e.local_name().as_ref() == b"c" => {
                if inside {
                    return Some(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    found.then_some(text)
}

/// Value of attribute `name` on every element named `tag`
pub fn attribute_values(xml: &str, tag: &str, name: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == tag.as_bytes() => {
                if let Some(v) = attr(&e, name) {
                    values.push(v);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    values
}

fn attr(e: &quick_xml::events::BytesStart<'_>, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}
