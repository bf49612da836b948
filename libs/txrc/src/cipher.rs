//! Involutive byte-stream transform that obfuscates the container at rest.
//!
//! The four key bytes live at offset 4 of the buffer itself and are never
//! transformed, so applying [`scramble`] twice returns the original bytes.

use crate::KEY_OFFSET;

/// Number of leading bytes (magic plus key) copied through untouched.
pub const PLAIN_PREFIX: usize = 8;

/// XOR the buffer body against the keystream derived from its own key bytes.
///
/// Buffers shorter than [`PLAIN_PREFIX`] carry no key and pass through
/// unchanged.
pub fn scramble(input: &[u8]) -> Vec<u8> {
    let mut output = input.to_vec();
    if input.len() < PLAIN_PREFIX {
        return output;
    }

    let key = &input[KEY_OFFSET..KEY_OFFSET + 4];
    for (position, byte) in output.iter_mut().enumerate().skip(PLAIN_PREFIX) {
        let stream = key[position % 3].wrapping_add(((position / 3) * usize::from(key[3])) as u8);
        *byte ^= stream;
    }

    output
}
