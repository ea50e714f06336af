//! Audit entry data structures
//!
//! The ledger only ever creates and deletes, so an entry is one of those two
//! operations plus a snapshot of the transaction involved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionId};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Transaction was recorded
    Create,
    /// Transaction was removed
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected transaction
    pub transaction_id: TransactionId,

    /// The transaction as it was created, or as it was just before removal
    pub record: Transaction,
}

impl AuditEntry {
    /// Create a new audit entry for a create operation
    pub fn create(txn: &Transaction) -> Self {
        Self::new(Operation::Create, txn)
    }

    /// Create a new audit entry for a delete operation
    pub fn delete(txn: &Transaction) -> Self {
        Self::new(Operation::Delete, txn)
    }

    fn new(operation: Operation, txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            transaction_id: txn.id(),
            record: txn.clone(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {} ({} {}, {})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.transaction_id,
            self.record.description(),
            self.record.amount(),
            self.record.category()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_datetime, Money, TransactionType};

    fn laptop() -> Transaction {
        Transaction::record(
            TransactionId::from_raw(1718000000000),
            "Laptop",
            Money::from_units(20000),
            TransactionType::Expense,
            parse_datetime("2025-01-16T18:05").unwrap(),
            "Electronics",
        )
        .unwrap()
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_and_delete_entries() {
        let txn = laptop();

        let created = AuditEntry::create(&txn);
        assert_eq!(created.operation, Operation::Create);
        assert_eq!(created.transaction_id, txn.id());

        let deleted = AuditEntry::delete(&txn);
        assert_eq!(deleted.operation, Operation::Delete);
        assert_eq!(deleted.record, txn);
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(&laptop());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""operation":"create""#));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.record, entry.record);
    }

    #[test]
    fn test_human_readable_format() {
        let formatted = AuditEntry::delete(&laptop()).format_human_readable();
        assert!(formatted.contains("DELETE"));
        assert!(formatted.contains("1718000000000"));
        assert!(formatted.contains("Laptop -20000.00, Electronics"));
    }
}
