//! gst-ledger - Terminal income/expense ledger with GST estimates
//!
//! This library records income and expense transactions, keeps them in a
//! local JSON file, totals them, estimates the GST owed on expenses from a
//! per-category rate table, and exports the ledger as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, GST rates)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Totals and GST computations
//! - `export`: CSV export
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use gst_ledger::config::{LedgerPaths, Settings};
//! use gst_ledger::models::TransactionType;
//! use gst_ledger::reports::{tax_owed, totals};
//! use gst_ledger::services::{CreateTransactionInput, TransactionService};
//! use gst_ledger::storage::Storage;
//!
//! # fn main() -> Result<(), gst_ledger::LedgerError> {
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all();
//!
//! TransactionService::new(&mut storage).create(CreateTransactionInput::new(
//!     "Laptop",
//!     "20000",
//!     TransactionType::Expense,
//!     "Electronics",
//! ))?;
//!
//! let ledger = storage.transactions.all();
//! println!("balance {}", totals(ledger).total);
//! println!("gst {}", tax_owed(ledger, &settings.gst_rates).rounded());
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
