//! # MPS7 Summary
//!
//! Decodes MPS7 binary transaction logs and summarizes them: autopay start
//! and end counts, debit and credit totals, and the net balance of one
//! selected user.
//!
//! ## Format
//!
//! A 9-byte header (`MPS7` magic, signed version byte, big-endian `u32`
//! record count) followed by tagged records. All multi-byte fields are
//! big-endian.
//!
//! ## Example
//!
//! ```no_run
//! use mps7_summary::{decode_file, write_report, AggregatorConfig};
//!
//! let config = AggregatorConfig::default();
//! let summary = decode_file("data.dat", &config).unwrap();
//! write_report(&summary, config.selected_user, std::io::stdout()).unwrap();
//! ```

pub mod aggregator;
pub mod error;
pub mod header;
pub mod money;
pub mod record;
pub mod report;

pub use aggregator::{
    aggregate, summarize, AggregatorConfig, CountPolicy, Summary, DEFAULT_SELECTED_USER,
};
pub use error::{Mps7Error, Result};
pub use header::Header;
pub use money::Money;
pub use record::{Record, RecordType};
pub use report::{group_thousands, write_report};

use log::debug;
use std::path::Path;

/// Reads a whole MPS7 file into memory and summarizes it.
pub fn decode_file<P: AsRef<Path>>(path: P, config: &AggregatorConfig) -> Result<Summary> {
    let path = path.as_ref();
    let buf = std::fs::read(path)?;
    debug!("Read {} bytes from {}", buf.len(), path.display());
    summarize(&buf, config)
}
