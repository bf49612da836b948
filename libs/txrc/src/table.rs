//! Pointer-table codec: packs and unpacks the deduplicated string slots.
//!
//! Each 32-bit slot is either zero (empty string) or a descriptor word with
//! the byte length in the top 10 bits and the text-relative offset in the
//! low 16 bits. The offset field wraps at 64KB, so the decoder threads a
//! running "extend" correction through the scan; its value depends on the
//! order new descriptors are first encountered.

use std::collections::HashMap;

use crate::profile::Profile;

/// Bit position of the string length inside a descriptor word.
const LENGTH_SHIFT: u32 = 22;
/// Mask for the text-relative offset inside a descriptor word.
const OFFSET_MASK: u32 = 0xFFFF;
/// The offset field wraps at this boundary.
const OFFSET_WRAP: usize = 0x10000;

/// Deduplicated string catalog recovered from the pointer table.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Distinct strings in first-seen order, escaped for single-line form.
    pub strings: Vec<String>,
    /// One entry per table slot, each an index into `strings`.
    pub indexes: Vec<usize>,
}

/// Walk the 32-bit slots between the table and text offsets and collect
/// every distinct descriptor together with the per-slot index list.
///
/// A slot whose computed position or length falls outside the buffer is
/// trailing padding: it contributes neither a string nor an index entry.
pub fn read_table(
    plain: &[u8],
    table_offset: usize,
    text_offset: usize,
    profile: Profile,
) -> Catalog {
    let mut catalog = Catalog::default();
    let mut seen: HashMap<u32, usize> = HashMap::new();
    let mut extend = 0usize;

    let mut position = table_offset;
    while position < text_offset {
        let word = profile.read_u32(plain, position);
        position += 4;

        if let Some(&entry) = seen.get(&word) {
            catalog.indexes.push(entry);
            continue;
        }

        let length = (word >> LENGTH_SHIFT) as usize;
        let local_offset = (word & OFFSET_MASK) as usize;
        let string_position = local_offset + text_offset + extend;

        if string_position > plain.len() || length > plain.len() - string_position {
            continue;
        }

        // The 16-bit offset field wraps past 64KB; later descriptors are
        // addressed relative to the next 64KB window.
        if local_offset + length > OFFSET_MASK as usize {
            extend += OFFSET_WRAP;
        }

        let raw = &plain[string_position..string_position + length];
        let text = escape(&String::from_utf8_lossy(raw));

        seen.insert(word, catalog.strings.len());
        catalog.indexes.push(catalog.strings.len());
        catalog.strings.push(text);
    }

    catalog
}

/// Pack escaped strings into a text section, producing one descriptor word
/// per string. Word zero marks the empty string; a non-empty string gets
/// its length shifted into the top bits over the running text offset.
pub fn pack_strings(strings: &[String]) -> (Vec<u32>, Vec<u8>) {
    let mut words = Vec::with_capacity(strings.len());
    let mut text: Vec<u8> = Vec::new();

    for line in strings {
        let bytes = unescape(line).into_bytes();
        let word = if bytes.is_empty() {
            0
        } else {
            ((bytes.len() as u32) << LENGTH_SHIFT) | text.len() as u32
        };

        words.push(word);
        text.extend_from_slice(&bytes);
    }

    (words, text)
}

/// Replace raw carriage returns and line feeds with two-character escapes
/// so every string stays on a single document line.
fn escape(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

/// Inverse of [`escape`].
fn unescape(text: &str) -> String {
    text.replace("\\r", "\r").replace("\\n", "\n")
}
