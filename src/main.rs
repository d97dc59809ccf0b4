//! MPS7 Summary CLI
//!
//! Reads an MPS7 transaction log and prints autopay counts, transfer totals
//! and the selected user's balance.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- txnlog.dat
//! ```
//!
//! The path defaults to `data.dat` when omitted.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `trace` to control logging verbosity

use mps7_summary::{decode_file, write_report, AggregatorConfig, Result};
use std::env;
use std::io;
use std::process;

const DEFAULT_INPUT: &str = "data.dat";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        println!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let input_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_INPUT.to_string());

    let config = AggregatorConfig::default();
    let summary = decode_file(&input_path, &config)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    write_report(&summary, config.selected_user, handle)?;

    Ok(())
}
