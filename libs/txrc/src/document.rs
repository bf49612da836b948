//! Human-editable text form of a decoded container.
//!
//! The document has three marker-bracketed sections, written in the order
//! TEXT, HEADER, INDEXES. Each section is individually delimited, so the
//! parser accepts them in any order.

use byteorder::{BigEndian, ByteOrder};

use crate::error::DocumentError;
use crate::table::Catalog;

pub const HEADER_START_MARKER: &str = "----------HEADER START----------";
pub const HEADER_END_MARKER: &str = "-----------HEADER END-----------";
pub const INDEXES_START_MARKER: &str = "---------INDEXES START----------";
pub const INDEXES_END_MARKER: &str = "----------INDEXES END-----------";
pub const TEXT_START_MARKER: &str = "-----------TEXT START-----------";
pub const TEXT_END_MARKER: &str = "------------TEXT END------------";

/// Header bytes rendered this many to a hexadecimal line.
const HEADER_ROW_SIZE: usize = 16;
/// Indexes rendered this many 4-digit values to a line.
const INDEXES_PER_LINE: usize = 8;
/// A short final indexes line is zero-padded to this many hex digits.
const INDEXES_LINE_PAD: usize = 16;

/// Parsed form of the three-section document.
#[derive(Debug, Default)]
pub struct Document {
    /// Raw header block bytes, exactly as listed in the HEADER section.
    pub header: Vec<u8>,
    /// One unique-entry index per pointer-table slot.
    pub indexes: Vec<usize>,
    /// Escaped strings in unique-entry order.
    pub strings: Vec<String>,
}

/// Render the decoded header block and string catalog as a document.
pub fn render(header: &[u8], catalog: &Catalog) -> String {
    let mut out = String::new();

    push_line(&mut out, TEXT_START_MARKER);
    for string in &catalog.strings {
        push_line(&mut out, string);
    }
    push_line(&mut out, TEXT_END_MARKER);

    push_line(&mut out, HEADER_START_MARKER);
    for row in header.chunks(HEADER_ROW_SIZE) {
        push_line(&mut out, &hex_row(row));
    }
    push_line(&mut out, HEADER_END_MARKER);

    push_line(&mut out, INDEXES_START_MARKER);
    for chunk in catalog.indexes.chunks(INDEXES_PER_LINE) {
        let mut line = String::with_capacity(INDEXES_PER_LINE * 4);
        for &index in chunk {
            line.push_str(&format!("{index:04X}"));
        }
        // a short final line is zero-padded to 16 hex digits
        while line.len() < INDEXES_LINE_PAD {
            line.push('0');
        }
        push_line(&mut out, &line);
    }
    out.push_str(INDEXES_END_MARKER);

    out.trim_end().to_string()
}

/// Scan the lines for the three marker pairs and rebuild the header bytes,
/// the index list, and the ordered string list.
pub fn parse(lines: &[&str]) -> Result<Document, DocumentError> {
    let mut header: Option<Vec<u8>> = None;
    let mut index_bytes: Option<Vec<u8>> = None;
    let mut strings: Option<Vec<String>> = None;

    let mut cursor = 0usize;
    while cursor < lines.len() {
        let line = lines[cursor];
        cursor += 1;

        match line {
            HEADER_START_MARKER => {
                let (body, next) = section_body(lines, cursor, HEADER_END_MARKER)?;
                let mut bytes = Vec::new();
                for row in body {
                    bytes.extend(parse_hex_row(row)?);
                }
                header = Some(bytes);
                cursor = next;
            }
            INDEXES_START_MARKER => {
                let (body, next) = section_body(lines, cursor, INDEXES_END_MARKER)?;
                let mut bytes = Vec::new();
                for row in body {
                    bytes.extend(parse_hex_row(row)?);
                }
                index_bytes = Some(bytes);
                cursor = next;
            }
            TEXT_START_MARKER => {
                let (body, next) = section_body(lines, cursor, TEXT_END_MARKER)?;
                strings = Some(body.iter().map(|line| (*line).to_string()).collect());
                cursor = next;
            }
            _ => {}
        }
    }

    let header = header.ok_or(DocumentError::MissingSection {
        marker: HEADER_START_MARKER,
    })?;
    let index_bytes = index_bytes.ok_or(DocumentError::MissingSection {
        marker: INDEXES_START_MARKER,
    })?;
    let strings = strings.ok_or(DocumentError::MissingSection {
        marker: TEXT_START_MARKER,
    })?;

    // index values are stored big-endian regardless of profile; the zero
    // padding of a short final line reads back as extra zero indexes
    let mut indexes = Vec::with_capacity(index_bytes.len() / 2);
    for pair in index_bytes.chunks_exact(2) {
        indexes.push(usize::from(BigEndian::read_u16(pair)));
    }

    Ok(Document {
        header,
        indexes,
        strings,
    })
}

fn section_body<'a>(
    lines: &'a [&'a str],
    start: usize,
    end_marker: &'static str,
) -> Result<(&'a [&'a str], usize), DocumentError> {
    for (offset, line) in lines[start..].iter().enumerate() {
        if *line == end_marker {
            return Ok((&lines[start..start + offset], start + offset + 1));
        }
    }

    Err(DocumentError::UnterminatedSection { marker: end_marker })
}

fn hex_row(bytes: &[u8]) -> String {
    let mut line = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        line.push_str(&format!("{byte:02X}"));
    }
    line
}

fn parse_hex_row(line: &str) -> Result<Vec<u8>, DocumentError> {
    let raw = line.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(DocumentError::BadHexLine {
            line: line.to_string(),
        });
    }

    let mut bytes = Vec::with_capacity(raw.len() / 2);
    for pair in raw.chunks_exact(2) {
        let high = hex_value(pair[0]).ok_or_else(|| DocumentError::BadHexLine {
            line: line.to_string(),
        })?;
        let low = hex_value(pair[1]).ok_or_else(|| DocumentError::BadHexLine {
            line: line.to_string(),
        })?;
        bytes.push(high << 4 | low);
    }

    Ok(bytes)
}

fn hex_value(character: u8) -> Option<u8> {
    match character {
        b'0'..=b'9' => Some(character - b'0'),
        b'A'..=b'F' => Some(character - b'A' + 10),
        b'a'..=b'f' => Some(character - b'a' + 10),
        _ => None,
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
