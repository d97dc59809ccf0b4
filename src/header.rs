//! Fixed 9-byte MPS7 file header.

use crate::error::{Mps7Error, Result};
use log::debug;

/// Magic code opening every MPS7 log.
pub const MAGIC: [u8; 4] = *b"MPS7";

/// Decoded file header.
///
/// Layout: 4-byte magic, 1 signed version byte, big-endian `u32` record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Magic code, always `MPS7` once decoded.
    pub magic: [u8; 4],

    /// Format version. Stored, not validated.
    pub version: i8,

    /// Number of records the header declares.
    pub declared_count: u32,
}

impl Header {
    /// Bytes occupied by the header; records start right after.
    pub const SIZE: usize = 9;

    /// Offset of the first record in the buffer.
    pub fn header_size(&self) -> usize {
        Self::SIZE
    }

    /// Decodes the header from the start of `buf`.
    ///
    /// The magic code is checked before anything else is read.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let bytes: &[u8; Self::SIZE] = buf
            .first_chunk()
            .ok_or(Mps7Error::TruncatedHeader { len: buf.len() })?;

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != MAGIC {
            return Err(Mps7Error::MalformedHeader { found: magic });
        }

        let version = i8::from_be_bytes([bytes[4]]);
        let declared_count = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);

        debug!(
            "Header: version {}, {} records declared",
            version, declared_count
        );

        Ok(Header {
            magic,
            version,
            declared_count,
        })
    }
}
