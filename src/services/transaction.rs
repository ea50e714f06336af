//! Transaction service
//!
//! The single entry point for mutating the ledger: validates creation
//! requests, derives the signed amount, assigns ids, and persists the whole
//! ledger after every create or remove.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

/// Input for creating a new transaction, as collected by the adapter
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub description: String,
    /// Positive amount as typed by the user; the sign comes from `kind`
    pub raw_amount: String,
    pub kind: TransactionType,
    /// Defaults to the current local time when absent
    pub timestamp: Option<NaiveDateTime>,
    pub category: String,
}

impl CreateTransactionInput {
    pub fn new(
        description: impl Into<String>,
        raw_amount: impl Into<String>,
        kind: TransactionType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            raw_amount: raw_amount.into(),
            kind,
            timestamp: None,
            category: category.into(),
        }
    }

    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a mut Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction and persist the ledger
    ///
    /// Returns [`LedgerError::Validation`] (ledger untouched) when the
    /// description, amount or category is missing or malformed. Returns
    /// [`LedgerError::Persistence`] when the write fails; the transaction is
    /// then held in memory but not on disk.
    pub fn create(&mut self, input: CreateTransactionInput) -> LedgerResult<Transaction> {
        if input.description.trim().is_empty() {
            return Err(LedgerError::Validation("Description is required".into()));
        }
        if input.category.trim().is_empty() {
            return Err(LedgerError::Validation("Category is required".into()));
        }

        let raw_amount =
            Money::parse(&input.raw_amount).map_err(|e| LedgerError::Validation(e.to_string()))?;

        let timestamp = input
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());

        let id = self.storage.transactions.next_id();
        let txn = Transaction::record(
            id,
            &input.description,
            raw_amount,
            input.kind,
            timestamp,
            &input.category,
        )
        .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.transactions.push(txn.clone());
        self.storage.transactions.save()?;
        self.storage.log_create(&txn);

        info!(id = %txn.id(), kind = %txn.kind(), amount = %txn.amount(), "transaction recorded");
        Ok(txn)
    }

    /// Remove a transaction by id and persist the ledger
    ///
    /// Removing an id that is not held is a no-op and returns `Ok(false)`.
    pub fn remove(&mut self, id: TransactionId) -> LedgerResult<bool> {
        let removed = self.storage.transactions.delete(id);
        self.storage.transactions.save()?;

        match removed {
            Some(txn) => {
                self.storage.log_delete(&txn);
                info!(id = %id, "transaction removed");
                Ok(true)
            }
            None => {
                debug!(id = %id, "remove requested for unknown transaction");
                Ok(false)
            }
        }
    }

    /// All transactions in insertion order
    pub fn list(&self) -> &[Transaction] {
        self.storage.transactions.all()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by its id as typed by the user
    pub fn find(&self, identifier: &str) -> Option<&Transaction> {
        identifier
            .parse::<TransactionId>()
            .ok()
            .and_then(|id| self.get(id))
    }

    pub fn count(&self) -> usize {
        self.storage.transactions.count()
    }
}
