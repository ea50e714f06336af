//! Transaction repository for JSON storage
//!
//! Holds the ledger in insertion order and mirrors it to a single storage
//! slot (`business_transactions.json`). The slot is a bare JSON array and is
//! rewritten in full after every mutation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{IdGenerator, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// What happened when the ledger was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No slot on disk yet; the ledger starts empty
    Missing,
    /// The slot was read successfully
    Loaded(usize),
    /// The slot could not be used; the ledger starts empty
    Recovered {
        reason: String,
        quarantined: Option<PathBuf>,
    },
}

/// Repository for the ordered ledger
#[derive(Debug)]
pub struct TransactionRepository {
    path: PathBuf,
    data: Vec<Transaction>,
    ids: IdGenerator,
}

impl TransactionRepository {
    /// Create an empty repository bound to a storage slot
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: Vec::new(),
            ids: IdGenerator::default(),
        }
    }

    /// Load the ledger from disk, falling back to an empty ledger
    ///
    /// Never fails. An unreadable or malformed slot is moved aside to
    /// `*.json.corrupt` so the next save cannot overwrite the only copy.
    pub fn load(&mut self) -> LoadOutcome {
        self.data.clear();

        if !self.path.exists() {
            debug!(path = %self.path.display(), "no ledger on disk, starting empty");
            return LoadOutcome::Missing;
        }

        match read_ledger(&self.path) {
            Ok(transactions) => {
                let count = transactions.len();
                self.data = transactions;
                if let Some(max) = self.max_id() {
                    self.ids.advance_past(max);
                }
                debug!(count, "ledger loaded");
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(path = %self.path.display(), error = %reason, "ledger unreadable, starting empty");
                let quarantined = quarantine(&self.path);
                LoadOutcome::Recovered {
                    reason,
                    quarantined,
                }
            }
        }
    }

    /// Write the whole ledger to its slot
    pub fn save(&self) -> LedgerResult<()> {
        write_json_atomic(&self.path, self.data.as_slice())
    }

    /// All transactions in insertion order
    pub fn all(&self) -> &[Transaction] {
        &self.data
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.data.iter().find(|t| t.id() == id)
    }

    /// Issue an id that no held or previously issued transaction has used
    pub fn next_id(&mut self) -> TransactionId {
        if let Some(max) = self.max_id() {
            self.ids.advance_past(max);
        }
        self.ids.next_id()
    }

    /// Append a transaction (in memory only)
    pub fn push(&mut self, txn: Transaction) {
        self.data.push(txn);
    }

    /// Remove a transaction, keeping the order of the rest (in memory only)
    pub fn delete(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.data.iter().position(|t| t.id() == id)?;
        Some(self.data.remove(index))
    }

    /// Largest id currently held
    pub fn max_id(&self) -> Option<TransactionId> {
        self.data.iter().map(Transaction::id).max()
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_ledger(path: &Path) -> LedgerResult<Vec<Transaction>> {
    let transactions: Vec<Transaction> = read_json(path)?.unwrap_or_default();

    let mut seen = HashSet::with_capacity(transactions.len());
    if let Some(dup) = transactions.iter().find(|t| !seen.insert(t.id())) {
        return Err(LedgerError::Json(format!(
            "duplicate transaction id {} in {}",
            dup.id(),
            path.display()
        )));
    }

    Ok(transactions)
}

/// Move an unreadable slot aside without replacing an earlier copy
///
/// The first copy is `*.json.corrupt`, later ones `*.json.corrupt.1`, `.2`, ...
fn quarantine(path: &Path) -> Option<PathBuf> {
    let first = path.with_extension("json.corrupt");
    let target = std::iter::once(first.clone())
        .chain((1..).map(|n| path.with_extension(format!("json.corrupt.{}", n))))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first);

    match fs::rename(path, &target) {
        Ok(()) => {
            warn!(path = %target.display(), "unreadable ledger moved aside");
            Some(target)
        }
        Err(e) => {
            warn!(error = %e, "could not move unreadable ledger aside");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_datetime, Money, TransactionType};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("business_transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn txn(id: u64, kind: TransactionType, units: i64, category: &str) -> Transaction {
        Transaction::record(
            TransactionId::from_raw(id),
            "Entry",
            Money::from_units(units),
            kind,
            parse_datetime("2025-01-15T10:30").unwrap(),
            category,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, mut repo) = create_test_repo();
        assert_eq!(repo.load(), LoadOutcome::Missing);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_save_and_reload_preserves_order() {
        let (_temp_dir, mut repo) = create_test_repo();
        repo.push(txn(30, TransactionType::Income, 500, "Non-Taxable"));
        repo.push(txn(10, TransactionType::Expense, 200, "Utilities"));
        repo.push(txn(20, TransactionType::Expense, 100, "Electronics"));
        repo.save().unwrap();

        let mut reloaded = TransactionRepository::new(repo.path().to_path_buf());
        assert_eq!(reloaded.load(), LoadOutcome::Loaded(3));
        assert_eq!(reloaded.all(), repo.all());
    }

    #[test]
    fn test_delete_keeps_order() {
        let (_temp_dir, mut repo) = create_test_repo();
        for id in 1..=4 {
            repo.push(txn(id, TransactionType::Income, 10, "Non-Taxable"));
        }

        let removed = repo.delete(TransactionId::from_raw(2)).unwrap();
        assert_eq!(removed.id().as_u64(), 2);

        let ids: Vec<u64> = repo.all().iter().map(|t| t.id().as_u64()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert!(repo.delete(TransactionId::from_raw(2)).is_none());
    }

    #[test]
    fn test_max_id() {
        let (_temp_dir, mut repo) = create_test_repo();
        assert_eq!(repo.max_id(), None);
        repo.push(txn(5, TransactionType::Income, 10, "Non-Taxable"));
        repo.push(txn(3, TransactionType::Income, 10, "Non-Taxable"));
        assert_eq!(repo.max_id(), Some(TransactionId::from_raw(5)));
    }

    #[test]
    fn test_next_id_skips_held_ids() {
        let (_temp_dir, mut repo) = create_test_repo();
        let future = u64::MAX / 2;
        repo.push(txn(future, TransactionType::Income, 10, "Non-Taxable"));

        let first = repo.next_id();
        assert_eq!(first.as_u64(), future + 1);

        // A removed id is never handed out again
        repo.delete(TransactionId::from_raw(future));
        assert!(repo.next_id() > first);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_empty() {
        let (temp_dir, mut repo) = create_test_repo();
        fs::write(repo.path(), "{not json").unwrap();

        match repo.load() {
            LoadOutcome::Recovered { quarantined, .. } => {
                assert_eq!(
                    quarantined,
                    Some(temp_dir.path().join("business_transactions.json.corrupt"))
                );
            }
            other => panic!("expected recovery, got {:?}", other),
        }
        assert!(repo.is_empty());
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_repeated_corruption_keeps_every_copy() {
        let (temp_dir, mut repo) = create_test_repo();

        fs::write(repo.path(), "first").unwrap();
        repo.load();
        fs::write(repo.path(), "second").unwrap();
        let outcome = repo.load();

        let first = temp_dir.path().join("business_transactions.json.corrupt");
        let second = temp_dir.path().join("business_transactions.json.corrupt.1");
        match outcome {
            LoadOutcome::Recovered { quarantined, .. } => {
                assert_eq!(quarantined, Some(second.clone()))
            }
            other => panic!("expected recovery, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(first).unwrap(), "first");
        assert_eq!(fs::read_to_string(second).unwrap(), "second");
    }

    #[test]
    fn test_wrong_shape_falls_back_to_empty() {
        let (_temp_dir, mut repo) = create_test_repo();
        fs::write(repo.path(), r#"{"transactions": []}"#).unwrap();
        assert!(matches!(repo.load(), LoadOutcome::Recovered { .. }));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_duplicate_ids_fall_back_to_empty() {
        let (_temp_dir, mut repo) = create_test_repo();
        repo.push(txn(1, TransactionType::Income, 10, "Non-Taxable"));
        repo.push(txn(1, TransactionType::Expense, 10, "Utilities"));
        repo.save().unwrap();

        assert!(matches!(repo.load(), LoadOutcome::Recovered { .. }));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_loads_handwritten_ledger() {
        let (_temp_dir, mut repo) = create_test_repo();
        let json = r#"[
            {"id": 482913, "text": "Salary", "amount": 50000, "datetime": "2025-01-15T10:30",
             "category": "Non-Taxable", "type": "income"},
            {"id": 77120, "text": "Laptop", "amount": -20000, "datetime": "2025-01-16T18:05",
             "category": "Electronics", "type": "expense"}
        ]"#;
        fs::write(repo.path(), json).unwrap();

        assert_eq!(repo.load(), LoadOutcome::Loaded(2));
        assert_eq!(repo.all()[1].amount(), Money::from_units(-20000));
    }
}
