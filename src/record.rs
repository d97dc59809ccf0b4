//! Record models and the per-record binary decoder.
//!
//! Every record opens with a common 13-byte prefix:
//! `| 1 byte type tag | 4 byte u32 timestamp | 8 byte u64 user id |`.
//! Debit and credit records append an 8-byte big-endian `f64` amount.

use crate::error::{Mps7Error, Result};
use log::trace;

/// Record type, identified by the leading tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Money leaving the account (tag `0x00`).
    Debit,

    /// Money entering the account (tag `0x01`).
    Credit,

    /// Autopay switched on (tag `0x02`).
    AutopayStart,

    /// Autopay switched off (tag `0x03`).
    AutopayEnd,
}

impl RecordType {
    /// Length of the common prefix shared by all records.
    pub const PREFIX_LEN: usize = 13;

    /// Length of a debit or credit record.
    pub const TRANSFER_LEN: usize = Self::PREFIX_LEN + 8;

    /// Maps a tag byte to its record type.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(RecordType::Debit),
            0x01 => Some(RecordType::Credit),
            0x02 => Some(RecordType::AutopayStart),
            0x03 => Some(RecordType::AutopayEnd),
            _ => None,
        }
    }

    /// The tag byte for this record type.
    pub fn tag(self) -> u8 {
        match self {
            RecordType::Debit => 0x00,
            RecordType::Credit => 0x01,
            RecordType::AutopayStart => 0x02,
            RecordType::AutopayEnd => 0x03,
        }
    }

    /// Returns `true` for debit and credit records, which carry an amount.
    pub fn is_transfer(self) -> bool {
        matches!(self, RecordType::Debit | RecordType::Credit)
    }

    /// Total encoded length of a record of this type.
    pub fn encoded_len(self) -> usize {
        if self.is_transfer() {
            Self::TRANSFER_LEN
        } else {
            Self::PREFIX_LEN
        }
    }
}

/// A decoded record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Record type from the tag byte.
    pub kind: RecordType,

    /// Unix timestamp in seconds.
    pub timestamp: u32,

    /// User the record belongs to.
    pub user_id: u64,

    /// Transfer amount, present exactly for debit and credit records.
    /// Kept as decoded; rounding happens in the report.
    pub amount: Option<f64>,
}

impl Record {
    /// Decodes one record starting at `offset`.
    ///
    /// Returns the record and the number of bytes it occupies. Never reads
    /// past the length implied by the tag.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let available = buf.len().saturating_sub(offset);

        let tag = *buf.get(offset).ok_or(Mps7Error::TruncatedRecord {
            offset,
            needed: 1,
            available,
        })?;

        let kind = RecordType::from_tag(tag).ok_or(Mps7Error::UnknownRecordType { tag, offset })?;
        let len = kind.encoded_len();

        let bytes = buf
            .get(offset..offset + len)
            .ok_or(Mps7Error::TruncatedRecord {
                offset,
                needed: len,
                available,
            })?;

        let timestamp = u32::from_be_bytes(field(bytes, 1));
        let user_id = u64::from_be_bytes(field(bytes, 5));
        let amount = if kind.is_transfer() {
            Some(f64::from_be_bytes(field(bytes, RecordType::PREFIX_LEN)))
        } else {
            None
        };

        let record = Record {
            kind,
            timestamp,
            user_id,
            amount,
        };
        trace!("Offset {}: {:?}", offset, record);

        Ok((record, len))
    }
}

/// Copies `N` bytes at `at` out of a record slice whose length is already checked.
fn field<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}
