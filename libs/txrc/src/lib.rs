//! Bidirectional codec for the TXRC localized-text resource container.
//!
//! A container is always materialized whole: [`decode`] turns the scrambled
//! binary form into a three-section editable text document, [`encode`] is
//! the exact inverse. Neither function performs any I/O.

pub mod cipher;
pub mod document;
pub mod error;
pub mod profile;
pub mod table;

use document::Document;
use error::{ContainerError, DocumentError};
use profile::Profile;
use table::Catalog;

/// Offset of the four cipher key bytes.
pub const KEY_OFFSET: usize = 0x04;
/// Offset of the profile discriminator byte.
pub const PROFILE_OFFSET: usize = 0x0C;
/// Offset of the pointer-table position field.
pub const TABLE_OFFSET_FIELD: usize = 0x14;
/// Offset of the text-section position field (rewritten as the table end
/// when a container is assembled).
pub const TEXT_OFFSET_FIELD: usize = 0x18;
/// Smallest buffer that can hold the interpreted header fields.
pub const MINIMUM_CONTAINER_SIZE: usize = 0x1C;
/// Table and text sections are zero-padded to this alignment.
pub const SECTION_ALIGN: usize = 16;

/// In-memory form of a decoded container.
#[derive(Debug)]
pub struct DecodedContainer {
    /// Unscrambled header block, from byte 0 up to the pointer table.
    pub header: Vec<u8>,
    /// Deduplicated strings and the per-slot index list.
    pub catalog: Catalog,
}

/// Decode a binary container into the editable text document.
pub fn decode(bytes: &[u8]) -> Result<String, ContainerError> {
    let container = decode_container(bytes)?;
    Ok(document::render(&container.header, &container.catalog))
}

/// Decode a binary container into its structured in-memory form.
pub fn decode_container(bytes: &[u8]) -> Result<DecodedContainer, ContainerError> {
    if bytes.len() < MINIMUM_CONTAINER_SIZE {
        return Err(ContainerError::TooSmall {
            expected: MINIMUM_CONTAINER_SIZE,
            received: bytes.len(),
        });
    }

    let profile = Profile::detect(bytes[PROFILE_OFFSET]);
    log::debug!("decoding container ({} bytes, {:?})", bytes.len(), profile);

    let mut plain = cipher::scramble(bytes);

    if profile == Profile::PlainHeader {
        // this profile never scrambles the header at rest, so the generic
        // pass above mangled it; restore those bytes from the input
        let header_size = usize::try_from(profile.read_u32(bytes, TEXT_OFFSET_FIELD))
            .map_err(|_| ContainerError::IntegerOverflow)?;

        if header_size > plain.len() {
            return Err(ContainerError::HeaderOutOfBounds {
                end: header_size,
                size: plain.len(),
            });
        }

        plain[..header_size].copy_from_slice(&bytes[..header_size]);
    }

    let table_offset = usize::try_from(profile.read_u32(&plain, TABLE_OFFSET_FIELD))
        .map_err(|_| ContainerError::IntegerOverflow)?;
    let text_offset = usize::try_from(profile.read_u32(&plain, TEXT_OFFSET_FIELD))
        .map_err(|_| ContainerError::IntegerOverflow)?;

    if table_offset > text_offset || text_offset > plain.len() {
        return Err(ContainerError::SectionOutOfBounds {
            table: table_offset,
            text: text_offset,
            size: plain.len(),
        });
    }

    if (text_offset - table_offset) % 4 != 0 {
        return Err(ContainerError::SlotCountMismatch {
            size: text_offset - table_offset,
        });
    }

    let catalog = table::read_table(&plain, table_offset, text_offset, profile);
    log::debug!(
        "table decoded: {} slots, {} unique strings",
        catalog.indexes.len(),
        catalog.strings.len()
    );

    Ok(DecodedContainer {
        header: plain[..table_offset].to_vec(),
        catalog,
    })
}

/// Encode the lines of a text document into a binary container.
pub fn encode(lines: &[&str]) -> Result<Vec<u8>, DocumentError> {
    let document = document::parse(lines)?;
    encode_document(&document)
}

/// Assemble a parsed document into a binary container.
pub fn encode_document(document: &Document) -> Result<Vec<u8>, DocumentError> {
    if document.header.len() < MINIMUM_CONTAINER_SIZE {
        return Err(DocumentError::HeaderTooSmall {
            expected: MINIMUM_CONTAINER_SIZE,
            received: document.header.len(),
        });
    }

    let profile = Profile::detect(document.header[PROFILE_OFFSET]);
    log::debug!(
        "encoding container ({} strings, {} slots, {:?})",
        document.strings.len(),
        document.indexes.len(),
        profile
    );

    let (words, text) = table::pack_strings(&document.strings);

    let mut plain = document.header.clone();
    for &index in &document.indexes {
        let word = words
            .get(index)
            .copied()
            .ok_or(DocumentError::IndexOutOfRange {
                index,
                entries: words.len(),
            })?;

        let mut slot = [0u8; 4];
        profile.write_u32(&mut slot, 0, word);
        plain.extend_from_slice(&slot);
    }

    pad_section(&mut plain);
    let table_end = u32::try_from(plain.len()).map_err(|_| DocumentError::ContainerTooLarge {
        size: plain.len(),
    })?;
    profile.write_u32(&mut plain, TEXT_OFFSET_FIELD, table_end);

    let header_size = plain.len();
    plain.extend_from_slice(&text);
    pad_section(&mut plain);

    let mut scrambled = cipher::scramble(&plain);
    if profile == Profile::PlainHeader {
        // header and table go out never-scrambled in this profile
        scrambled[..header_size].copy_from_slice(&plain[..header_size]);
    }

    Ok(scrambled)
}

fn pad_section(buffer: &mut Vec<u8>) {
    while buffer.len() % SECTION_ALIGN != 0 {
        buffer.push(0);
    }
}
