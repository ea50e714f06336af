//! Reports module for gst-ledger
//!
//! Pure computations over a ledger snapshot: running totals and the GST
//! estimate. Nothing here touches storage.

pub mod gst;
pub mod summary;

pub use gst::{gst_breakdown, tax_owed, CategoryTax, TaxOwed};
pub use summary::{totals, LedgerTotals};
