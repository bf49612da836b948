//! The two container variants and their endian-aware field access.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Container variant, distinguished by the header flag byte at offset 0x0C.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Fully scrambled container with little-endian header fields.
    Scrambled,
    /// Container that keeps its header and pointer table plaintext and
    /// stores header fields big-endian.
    PlainHeader,
}

impl Profile {
    /// Pick the profile from the discriminator byte.
    pub fn detect(flag: u8) -> Self {
        if flag == 0 {
            Self::PlainHeader
        } else {
            Self::Scrambled
        }
    }

    /// Read a 32-bit field in this profile's byte order.
    pub fn read_u32(self, buffer: &[u8], position: usize) -> u32 {
        match self {
            Self::Scrambled => LittleEndian::read_u32(&buffer[position..position + 4]),
            Self::PlainHeader => BigEndian::read_u32(&buffer[position..position + 4]),
        }
    }

    /// Write a 32-bit field in this profile's byte order.
    pub fn write_u32(self, buffer: &mut [u8], position: usize, value: u32) {
        match self {
            Self::Scrambled => LittleEndian::write_u32(&mut buffer[position..position + 4], value),
            Self::PlainHeader => BigEndian::write_u32(&mut buffer[position..position + 4], value),
        }
    }
}
