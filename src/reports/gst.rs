//! GST owed on expenses
//!
//! Tax is accumulated exactly, as minor units multiplied by basis points, and
//! only rounded to two decimals when a caller asks for a [`Money`] value.
//! Summing pre-rounded per-transaction figures would drift over a long ledger.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use crate::models::{CategoryTaxTable, GstRate, Money, Transaction};

/// Unrounded tax amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TaxOwed {
    /// Minor units x basis points
    scaled: i128,
}

impl TaxOwed {
    pub const fn zero() -> Self {
        Self { scaled: 0 }
    }

    /// Tax on one amount at one rate
    pub fn on(amount: Money, rate: GstRate) -> Self {
        Self {
            scaled: i128::from(amount.abs().cents()) * i128::from(rate.basis_points()),
        }
    }

    /// Round half up to the nearest minor unit
    pub fn rounded(&self) -> Money {
        let full = i128::from(GstRate::FULL);
        let cents = (self.scaled + full / 2) / full;
        Money::from_cents(i64::try_from(cents).unwrap_or(i64::MAX))
    }

    pub fn is_zero(&self) -> bool {
        self.scaled == 0
    }
}

impl AddAssign for TaxOwed {
    fn add_assign(&mut self, other: Self) {
        self.scaled += other.scaled;
    }
}

impl std::iter::Sum for TaxOwed {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

impl fmt::Display for TaxOwed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

/// Estimated GST over all expense transactions
///
/// Income never attracts tax. Categories missing from the table count as 0%.
pub fn tax_owed(ledger: &[Transaction], rates: &CategoryTaxTable) -> TaxOwed {
    ledger
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| TaxOwed::on(t.amount(), rates.rate_for(t.category())))
        .sum()
}

/// GST for one expense category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTax {
    pub category: String,
    pub rate: GstRate,
    /// Whether the category is in the configured table
    pub configured: bool,
    /// Total spent in the category (positive)
    pub expense: Money,
    pub transaction_count: usize,
    pub tax: TaxOwed,
}

/// Per-category GST breakdown of expenses, ordered by category name
///
/// The tax column sums to exactly [`tax_owed`] for the same ledger.
pub fn gst_breakdown(ledger: &[Transaction], rates: &CategoryTaxTable) -> Vec<CategoryTax> {
    let mut by_category: BTreeMap<&str, CategoryTax> = BTreeMap::new();

    for txn in ledger.iter().filter(|t| t.is_expense()) {
        let category = txn.category();
        let rate = rates.rate_for(category);
        let row = by_category.entry(category).or_insert_with(|| CategoryTax {
            category: category.to_string(),
            rate,
            configured: rates.contains(category),
            expense: Money::zero(),
            transaction_count: 0,
            tax: TaxOwed::zero(),
        });

        row.expense += txn.amount().abs();
        row.transaction_count += 1;
        row.tax += TaxOwed::on(txn.amount(), rate);
    }

    by_category.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_datetime, TransactionId, TransactionType, NON_TAXABLE};

    fn txn(id: u64, kind: TransactionType, cents: i64, category: &str) -> Transaction {
        Transaction::record(
            TransactionId::from_raw(id),
            "Entry",
            Money::from_cents(cents),
            kind,
            parse_datetime("2025-03-01T08:00").unwrap(),
            category,
        )
        .unwrap()
    }

    #[test]
    fn test_laptop_scenario() {
        let rates = CategoryTaxTable::default();
        let ledger = vec![
            txn(1, TransactionType::Income, 5_000_000, NON_TAXABLE),
            txn(2, TransactionType::Expense, 2_000_000, "Electronics"),
        ];

        assert_eq!(tax_owed(&ledger[..1], &rates), TaxOwed::zero());
        assert_eq!(tax_owed(&ledger, &rates).rounded(), Money::from_units(3600));
        assert_eq!(tax_owed(&ledger, &rates).to_string(), "3600.00");
    }

    #[test]
    fn test_income_is_never_taxed() {
        let rates = CategoryTaxTable::default();
        let ledger = vec![txn(1, TransactionType::Income, 100_000, "Electronics")];
        assert!(tax_owed(&ledger, &rates).is_zero());
    }

    #[test]
    fn test_zero_rate_and_unknown_categories() {
        let rates = CategoryTaxTable::default();
        let ledger = vec![
            txn(1, TransactionType::Expense, 10_000, NON_TAXABLE),
            txn(2, TransactionType::Expense, 25_000, "Travel"),
        ];
        assert!(tax_owed(&ledger, &rates).is_zero());
    }

    #[test]
    fn test_no_compounded_rounding() {
        // 0.05 at 5% is 0.0025 each; 100 of them is exactly 0.25
        let rates = CategoryTaxTable::default();
        let ledger: Vec<_> = (0..100)
            .map(|i| txn(i, TransactionType::Expense, 5, "Utilities"))
            .collect();

        assert_eq!(tax_owed(&ledger, &rates).rounded(), Money::from_cents(25));
        assert_eq!(TaxOwed::on(Money::from_cents(5), GstRate::from_percent(5).unwrap()).rounded(), Money::zero());
    }

    #[test]
    fn test_rounds_half_up() {
        // 0.10 at 5% = 0.005 -> 0.01
        let tax = TaxOwed::on(Money::from_cents(10), GstRate::from_percent(5).unwrap());
        assert_eq!(tax.rounded(), Money::from_cents(1));
    }

    #[test]
    fn test_breakdown_matches_total() {
        let rates = CategoryTaxTable::default();
        let ledger = vec![
            txn(1, TransactionType::Expense, 2_000_000, "Electronics"),
            txn(2, TransactionType::Expense, 100_000, "Utilities"),
            txn(3, TransactionType::Expense, 50_000, "Electronics"),
            txn(4, TransactionType::Expense, 7_500, "Travel"),
            txn(5, TransactionType::Income, 9_999_900, NON_TAXABLE),
        ];

        let rows = gst_breakdown(&ledger, &rates);
        let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Travel", "Utilities"]);

        let electronics = &rows[0];
        assert_eq!(electronics.transaction_count, 2);
        assert_eq!(electronics.expense, Money::from_cents(2_050_000));
        assert_eq!(electronics.tax.rounded(), Money::from_units(3690));

        assert!(!rows[1].configured);
        assert!(rows[1].tax.is_zero());

        let sum: TaxOwed = rows.iter().map(|r| r.tax).sum();
        assert_eq!(sum, tax_owed(&ledger, &rates));
    }
}
