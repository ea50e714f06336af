//! GST rates keyed by category
//!
//! The rate table is fixed at configuration time. Rates are held exactly as
//! basis points (hundredths of a percent) so that 2.5% or 0.25% survive a
//! round trip through `config.json` without float drift.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the default zero-rated category
pub const NON_TAXABLE: &str = "Non-Taxable";

/// A GST rate between 0% and 100%
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct GstRate(u32);

impl GstRate {
    /// Basis points in 100%
    pub const FULL: u32 = 10_000;

    /// Create a rate from whole percent (18 -> 18%)
    pub fn from_percent(percent: u32) -> Result<Self, RateError> {
        percent
            .checked_mul(100)
            .filter(|bps| *bps <= Self::FULL)
            .map(Self)
            .ok_or(RateError::OutOfRange(percent as f64))
    }

    /// Create a rate from basis points (1800 -> 18%)
    pub fn from_basis_points(bps: u32) -> Result<Self, RateError> {
        if bps > Self::FULL {
            return Err(RateError::OutOfRange(bps as f64 / 100.0));
        }
        Ok(Self(bps))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn basis_points(&self) -> u32 {
        self.0
    }

    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<f64> for GstRate {
    type Error = RateError;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(RateError::OutOfRange(percent));
        }
        let bps = (percent * 100.0).round();
        if (bps - percent * 100.0).abs() > 1e-6 {
            return Err(RateError::TooPrecise(percent));
        }
        Ok(Self(bps as u32))
    }
}

impl From<GstRate> for f64 {
    fn from(rate: GstRate) -> Self {
        rate.as_percent()
    }
}

/// Renders as the bare percentage: `18`, `2.5`
impl fmt::Display for GstRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_percent())
    }
}

/// Error type for rate construction
#[derive(Debug, Clone, PartialEq)]
pub enum RateError {
    OutOfRange(f64),
    TooPrecise(f64),
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(v) => write!(f, "GST rate must be between 0 and 100, got {}", v),
            Self::TooPrecise(v) => {
                write!(f, "GST rate supports at most two decimal places, got {}", v)
            }
        }
    }
}

impl std::error::Error for RateError {}

/// Mapping from category name to GST rate
///
/// Lookups of categories that are not configured yield 0%, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTaxTable {
    rates: BTreeMap<String, GstRate>,
}

impl CategoryTaxTable {
    /// Create an empty table (every category is 0%)
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with_rate(mut self, category: impl Into<String>, rate: GstRate) -> Self {
        self.rates.insert(category.into(), rate);
        self
    }

    /// Rate for a category, 0% when the category is not configured
    pub fn rate_for(&self, category: &str) -> GstRate {
        self.rates.get(category).copied().unwrap_or_default()
    }

    /// Whether the category is present in the table
    pub fn contains(&self, category: &str) -> bool {
        self.rates.contains_key(category)
    }

    /// Iterate categories in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, GstRate)> {
        self.rates.iter().map(|(name, rate)| (name.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for CategoryTaxTable {
    fn default() -> Self {
        let rate = |bps| GstRate(bps);
        Self::empty()
            .with_rate("Electronics", rate(1800))
            .with_rate("Utilities", rate(500))
            .with_rate("Office Supplies", rate(1200))
            .with_rate(NON_TAXABLE, rate(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = CategoryTaxTable::default();
        assert_eq!(table.len(), 4);
        assert_eq!(table.rate_for("Electronics").basis_points(), 1800);
        assert_eq!(table.rate_for("Utilities").basis_points(), 500);
        assert_eq!(table.rate_for("Office Supplies").basis_points(), 1200);
        assert!(table.rate_for(NON_TAXABLE).is_zero());
    }

    #[test]
    fn test_unknown_category_is_zero() {
        let table = CategoryTaxTable::default();
        assert!(!table.contains("Travel"));
        assert_eq!(table.rate_for("Travel"), GstRate::zero());
    }

    #[test]
    fn test_rate_bounds() {
        assert!(GstRate::from_percent(100).is_ok());
        assert!(GstRate::from_percent(101).is_err());
        assert!(GstRate::from_basis_points(10_001).is_err());
        assert!(GstRate::try_from(-1.0).is_err());
        assert!(GstRate::try_from(f64::NAN).is_err());
        assert!(GstRate::try_from(2.555).is_err());
        assert_eq!(GstRate::try_from(2.5).unwrap().basis_points(), 250);
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(GstRate::from_percent(18).unwrap().to_string(), "18");
        assert_eq!(GstRate::from_basis_points(250).unwrap().to_string(), "2.5");
        assert_eq!(GstRate::zero().to_string(), "0");
    }

    #[test]
    fn test_table_serde() {
        let json = r#"{"Electronics": 18, "Travel": 2.5, "Non-Taxable": 0}"#;
        let table: CategoryTaxTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.rate_for("Travel").basis_points(), 250);

        let back = serde_json::to_string(&table).unwrap();
        let again: CategoryTaxTable = serde_json::from_str(&back).unwrap();
        assert_eq!(table, again);
    }

    #[test]
    fn test_table_rejects_out_of_range_rate() {
        let json = r#"{"Electronics": 180}"#;
        assert!(serde_json::from_str::<CategoryTaxTable>(json).is_err());
    }
}
