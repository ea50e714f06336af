//! Balance, income and expense totals

use crate::models::{Money, Transaction};

/// Aggregate figures for a ledger
///
/// `total == income - expense` always holds; `income` and `expense` are
/// both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerTotals {
    /// Sum of all signed amounts (the balance)
    pub total: Money,
    /// Sum of positive amounts
    pub income: Money,
    /// Absolute value of the sum of negative amounts
    pub expense: Money,
}

/// Compute totals over a ledger snapshot
pub fn totals(ledger: &[Transaction]) -> LedgerTotals {
    let mut income = Money::zero();
    let mut outflow = Money::zero();

    for txn in ledger {
        let amount = txn.amount();
        if amount.is_positive() {
            income += amount;
        } else {
            outflow += amount;
        }
    }

    LedgerTotals {
        total: income + outflow,
        income,
        expense: outflow.abs(),
    }
}
