//! Display formatting for terminal output
//!
//! Renders the ledger, its totals and the GST breakdown as text tables for
//! the CLI. Nothing here touches storage.

pub mod report;
pub mod transaction;

pub use report::{format_gst_breakdown, format_rate_table, format_summary};
pub use transaction::{format_transaction_details, format_transaction_list, format_transaction_short};
