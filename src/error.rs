//! Error types for the MPS7 decoder.

use thiserror::Error;

/// Result type alias for decoder operations
pub type Result<T> = std::result::Result<T, Mps7Error>;

/// Errors that can occur while decoding an MPS7 log.
///
/// Every variant is fatal to the run: nothing is skipped or repaired.
#[derive(Error, Debug)]
pub enum Mps7Error {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Total is NaN or infinite and cannot be printed as currency
    #[error("Invalid amount: {0}")]
    Amount(#[from] rust_decimal::Error),

    /// Buffer too short to hold the fixed header
    #[error("Truncated header: need 9 bytes, found {len}")]
    TruncatedHeader { len: usize },

    /// Header magic code is not `MPS7`
    #[error("Header code is invalid: {:?}", String::from_utf8_lossy(.found))]
    MalformedHeader { found: [u8; 4] },

    /// Tag byte outside the four defined record types
    #[error("Unknown record type 0x{tag:02x} at offset {offset}")]
    UnknownRecordType { tag: u8, offset: usize },

    /// Buffer ends before the record's full length
    #[error("Truncated record at offset {offset}: need {needed} bytes, found {available}")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },
}
