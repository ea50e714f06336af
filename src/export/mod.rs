//! Export module for gst-ledger
//!
//! Writes the ledger as a flat CSV table (`transactions.csv`). This is a
//! write-only interface; there is no import path.

pub mod csv;

pub use self::csv::{export_transactions_csv, to_table, write_transactions_csv, DEFAULT_EXPORT_FILE};
