//! Transaction identifiers
//!
//! Ids are plain numbers on disk (the ledger file stores `"id": 1718000000000`)
//! but a newtype in code so they cannot be confused with amounts or counts.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier of a transaction within a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Wrap a raw numeric id
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying number
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TransactionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for TransactionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Issues time-based transaction ids that never repeat
///
/// Each id is the current Unix time in milliseconds, bumped past the last
/// issued id when two creations land in the same millisecond (or the clock
/// steps backwards). Seed it with the largest id already in the ledger so new
/// ids never collide with loaded ones.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Create a generator that will only issue ids greater than `last`
    pub fn starting_after(last: Option<TransactionId>) -> Self {
        Self {
            last: last.map(|id| id.0).unwrap_or(0),
        }
    }

    /// Make sure every later id is greater than `id`
    pub fn advance_past(&mut self, id: TransactionId) {
        self.last = self.last.max(id.0);
    }

    /// Issue the next id
    pub fn next_id(&mut self) -> TransactionId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        TransactionId(id)
    }
}
