//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (paise/cents, i64) so that totals
//! never accumulate floating-point error. On disk an amount is a plain JSON
//! number in major units (`50000`, `-12.5`).
//!
//! Amounts are limited to [`Money::MAX`] in magnitude (15 significant digits).
//! Within that range the JSON round-trip through `f64` is exact.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from users or from disk, in minor units
    pub const MAX_CENTS: i64 = 999_999_999_999_999;

    /// Largest accepted amount (9,999,999,999,999.99)
    pub const MAX: Self = Self(Self::MAX_CENTS);

    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use gst_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor units portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse a user-entered amount
    ///
    /// Accepts "10.50", "-10.50", "₹10.50", "$10", "10.5". At most two
    /// fractional digits are allowed; anything finer is rejected rather than
    /// silently truncated. Amounts beyond [`Money::MAX`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let rest = rest
            .strip_prefix('₹')
            .or_else(|| rest.strip_prefix('$'))
            .unwrap_or(rest)
            .trim_start();

        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (rest, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;
        if cents > Self::MAX_CENTS {
            return Err(MoneyParseError::OutOfRange(trimmed.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Shortest decimal form without a symbol: `50000`, `-12.5`, `0.05`
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let units = self.units().abs();
        let part = self.cents_part();

        if part == 0 {
            format!("{}{}", sign, units)
        } else if part % 10 == 0 {
            format!("{}{}.{}", sign, units, part / 10)
        } else {
            format!("{}{}.{:02}", sign, units, part)
        }
    }

    /// Format with a currency symbol and two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents_part() == 0 {
            serializer.serialize_i64(self.units())
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() > Self::MAX_CENTS as f64 {
            return Err(serde::de::Error::custom(format!(
                "amount out of range: {}",
                value
            )));
        }
        Ok(Self(cents as i64))
    }
}

// Arithmetic saturates at the i64 bounds. A single amount is capped at
// `MAX_CENTS`, so only a ledger of thousands of maximal entries gets there.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is required"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount too large: {} (maximum is {})", s, Money::MAX)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_units(50000).format_with_symbol("₹"), "₹50000.00");
        assert_eq!(Money::from_cents(-250).format_with_symbol("₹"), "-₹2.50");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_units(-1000).to_plain_string(), "-1000");
        assert_eq!(Money::from_cents(1250).to_plain_string(), "12.5");
        assert_eq!(Money::from_cents(5).to_plain_string(), "0.05");
        assert_eq!(Money::from_cents(-1999).to_plain_string(), "-19.99");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse(" 20000 ").unwrap().cents(), 2_000_000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("10.555").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(Money::parse("9999999999999.99"), Ok(Money::MAX));
        assert_eq!(Money::parse("-9999999999999.99"), Ok(-Money::MAX));
        assert!(matches!(
            Money::parse("10000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("90000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_large_amounts_survive_json() {
        for cents in [
            Money::MAX_CENTS,
            -Money::MAX_CENTS,
            900_719_925_474_093,
            123_456_789_012_345,
            999_999_999_999_901,
        ] {
            let m = Money::from_cents(cents);
            let json = serde_json::to_string(&m).unwrap();
            let back: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(back, m, "{} via {}", cents, json);
        }
    }

    #[test]
    fn test_out_of_range_json_is_rejected() {
        assert!(serde_json::from_str::<Money>("90071992547409.93").is_err());
        assert!(serde_json::from_str::<Money>("-1e300").is_err());
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = std::iter::repeat(Money::MAX).take(20_000).sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((-Money::MAX - Money::from_cents(i64::MAX)).cents(), i64::MIN);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serializes_as_major_units() {
        assert_eq!(serde_json::to_string(&Money::from_units(50000)).unwrap(), "50000");
        assert_eq!(serde_json::to_string(&Money::from_cents(-1250)).unwrap(), "-12.5");

        let m: Money = serde_json::from_str("-20000").unwrap();
        assert_eq!(m.cents(), -2_000_000);
        let m: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(m.cents(), 1999);
    }
}
