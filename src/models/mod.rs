//! Core data models for gst-ledger
//!
//! Transactions, the money type they are denominated in, their ids, and the
//! GST rate table keyed by category.

pub mod ids;
pub mod money;
pub mod tax_rate;
pub mod transaction;

pub use ids::{IdGenerator, TransactionId};
pub use money::{Money, MoneyParseError};
pub use tax_rate::{CategoryTaxTable, GstRate, RateError, NON_TAXABLE};
pub use transaction::{
    format_timestamp, parse_datetime, Transaction, TransactionType, TransactionValidationError, DATETIME_FORMAT,
};
