//! Storage layer for gst-ledger
//!
//! The ledger lives in a single JSON slot written atomically after every
//! mutation; creates and deletes are also appended to the audit log.

pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use transactions::{LoadOutcome, TransactionRepository};

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::Transaction;

/// Storage coordinator owned by the composition root
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.ledger_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load the ledger from disk (never fails, see [`TransactionRepository::load`])
    pub fn load_all(&mut self) -> LoadOutcome {
        self.transactions.load()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Audit a create; a failure here is logged, not returned
    pub fn log_create(&self, txn: &Transaction) {
        if let Err(e) = self.audit.log(&AuditEntry::create(txn)) {
            warn!(id = %txn.id(), error = %e, "failed to audit transaction create");
        }
    }

    /// Audit a delete; a failure here is logged, not returned
    pub fn log_delete(&self, txn: &Transaction) {
        if let Err(e) = self.audit.log(&AuditEntry::delete(txn)) {
            warn!(id = %txn.id(), error = %e, "failed to audit transaction delete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.load_all(), LoadOutcome::Missing);
        assert_eq!(
            storage.transactions.path(),
            temp_dir.path().join("data").join("business_transactions.json")
        );
    }
}
