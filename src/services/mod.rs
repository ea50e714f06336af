//! Service layer for gst-ledger
//!
//! Business logic on top of the storage layer: validation, id assignment and
//! persistence of every mutation.

pub mod transaction;

pub use transaction::{CreateTransactionInput, TransactionService};
