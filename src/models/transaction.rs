//! Transaction model
//!
//! A transaction is immutable once recorded. The sign of `amount` and the
//! `type` field encode the same fact twice; both are derived in one place
//! (`Transaction::record`) and re-checked whenever a record is deserialized,
//! so a mismatched pair cannot exist in memory.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Persisted timestamp layout, minute precision
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money in (positive amount)
    Income,
    /// Money out (negative amount)
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Apply this direction's sign to a positive magnitude
    pub fn signed(&self, magnitude: Money) -> Money {
        match self {
            Self::Income => magnitude.abs(),
            Self::Expense => -magnitude.abs(),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTransaction", into = "StoredTransaction")]
pub struct Transaction {
    id: TransactionId,
    description: String,
    amount: Money,
    timestamp: NaiveDateTime,
    category: String,
    kind: TransactionType,
}

impl Transaction {
    /// Record a new transaction from a positive raw amount and a direction
    pub(crate) fn record(
        id: TransactionId,
        description: &str,
        raw_amount: Money,
        kind: TransactionType,
        timestamp: NaiveDateTime,
        category: &str,
    ) -> Result<Self, TransactionValidationError> {
        if raw_amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }

        let txn = Self {
            id,
            description: description.trim().to_string(),
            amount: kind.signed(raw_amount),
            timestamp: to_minute(timestamp),
            category: category.trim().to_string(),
            kind,
        };
        txn.validate()?;
        Ok(txn)
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Signed amount (positive for income, negative for expense)
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }

        let sign_agrees = match self.kind {
            TransactionType::Income => self.amount.is_positive(),
            TransactionType::Expense => self.amount.is_negative(),
        };
        if !sign_agrees {
            return Err(TransactionValidationError::SignMismatch {
                amount: self.amount,
                kind: self.kind,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.timestamp.format(DATETIME_FORMAT),
            self.description,
            self.amount,
            self.category
        )
    }
}

/// On-disk shape of a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTransaction {
    id: TransactionId,
    #[serde(alias = "description")]
    text: String,
    amount: Money,
    #[serde(with = "minute_datetime")]
    datetime: NaiveDateTime,
    category: String,
    #[serde(rename = "type")]
    kind: TransactionType,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = TransactionValidationError;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        let txn = Self {
            id: stored.id,
            description: stored.text,
            amount: stored.amount,
            timestamp: to_minute(stored.datetime),
            category: stored.category,
            kind: stored.kind,
        };
        txn.validate()?;
        Ok(txn)
    }
}

impl From<Transaction> for StoredTransaction {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            text: txn.description,
            amount: txn.amount,
            datetime: txn.timestamp,
            category: txn.category,
            kind: txn.kind,
        }
    }
}

/// `YYYY-MM-DDTHH:MM` on write; seconds (and fractions) tolerated on read
mod minute_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid datetime '{}'", raw))
        })
    }
}

/// Format a timestamp with a user-configured strftime layout
///
/// Unlike `format(..).to_string()`, an invalid layout is an error, not a panic.
pub fn format_timestamp(ts: NaiveDateTime, layout: &str) -> Result<String, fmt::Error> {
    use std::fmt::Write;

    let mut out = String::new();
    write!(out, "{}", ts.format(layout))?;
    Ok(out)
}

/// Drop seconds so the in-memory value matches what gets persisted
fn to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Parse a user- or file-supplied timestamp
///
/// Accepts `2025-01-15T10:30`, `2025-01-15 10:30`, with optional seconds,
/// and a bare date (midnight).
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    const LAYOUTS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    EmptyCategory,
    ZeroAmount,
    NegativeAmount,
    SignMismatch {
        amount: Money,
        kind: TransactionType,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::EmptyCategory => write!(f, "Category is required"),
            Self::ZeroAmount => write!(f, "Amount must be greater than zero"),
            Self::NegativeAmount => write!(
                f,
                "Amount must be entered as a positive number; the type sets the sign"
            ),
            Self::SignMismatch { amount, kind } => {
                write!(f, "Amount {} does not match transaction type '{}'", amount, kind)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
