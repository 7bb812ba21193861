//! Money type for representing currency amounts
//!
//! Amounts are stored in cents (i64) to avoid floating-point drift. Display
//! uses a [`Currency`] for the symbol and where it goes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::currency::Currency;

/// A monetary amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single transaction, opening balance or credit
    /// limit may carry (9,999,999,999.99)
    pub const MAX_AMOUNT: Money = Money(999_999_999_999);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_manager::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Fractional part in cents (0-99)
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
        Self(self.0.abs())
    }

    /// Sum that reports overflow instead of wrapping
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Sum clamped to the `i64` range, for report totals
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Whether the magnitude is within [`Money::MAX_AMOUNT`]
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -Self::MAX_AMOUNT.0 && self.0 <= Self::MAX_AMOUNT.0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "10", "1,250.5" and a leading currency
    /// symbol such as "$10".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest: String = rest
            .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .chars()
            .filter(|c| *c != ',')
            .collect();

        if rest.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest.as_str(), ""),
        };

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
        };

        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction[..2].parse().unwrap_or(0),
        };

        let total = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with the user's currency, e.g. `$12.50` or `12.50 €`
    pub fn format_with(&self, currency: &Currency) -> String {
        currency.apply(&self.abs().to_string(), self.is_negative())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrencyPosition;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-3.25").unwrap().cents(), -325);
        assert_eq!(Money::parse("$1,250.99").unwrap().cents(), 125099);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_format_with_currency() {
        let dollar = Currency::default();
        assert_eq!(Money::from_cents(1250).format_with(&dollar), "$12.50");
        assert_eq!(Money::from_cents(-1250).format_with(&dollar), "-$12.50");

        let euro = Currency::new("€", CurrencyPosition::Suffix);
        assert_eq!(Money::from_cents(1250).format_with(&euro), "12.50 €");
    }

    #[test]
    fn test_arithmetic() {
        let mut m = Money::from_cents(1000);
        m += Money::from_cents(250);
        m -= Money::from_cents(50);
        assert_eq!(m.cents(), 1200);
        assert_eq!((-m).cents(), -1200);

        let total: Money = [100, 200, 300].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_checked_add_and_limit() {
        let near_max = Money::from_cents(i64::MAX - 10);
        assert_eq!(near_max.checked_add(Money::from_cents(20)), None);
        assert_eq!(
            Money::from_cents(5).checked_add(Money::from_cents(-7)),
            Some(Money::from_cents(-2))
        );

        assert!(Money::MAX_AMOUNT.is_within_limit());
        assert!((-Money::MAX_AMOUNT).is_within_limit());
        assert!(!Money::parse("90000000000000000").unwrap().is_within_limit());

        let total: Money = [near_max, near_max].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }
}
