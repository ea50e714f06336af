//! Audit logging for gst-ledger
//!
//! Records every create and delete, with a snapshot of the transaction, in an
//! append-only JSONL file next to the settings.
//!
//! # Example
//!
//! ```rust,ignore
//! use gst_ledger::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&txn))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
