//! Exact monetary amounts.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CENTS_PER_UNIT: u64 = 100;

/// A non-negative amount of money stored in cents.
///
/// Prices and totals never go through floating point, so `10.00 * 3` is
/// exactly `30.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative: {0}")]
    Negative(String),
    #[error("amount has more than two decimal places: {0}")]
    TooPrecise(String),
    #[error("amount is not a decimal number: {0}")]
    Invalid(String),
    #[error("amount is too large: {0}")]
    Overflow(String),
}

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Price of `quantity` units, saturating at the largest representable amount.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    #[must_use]
    pub const fn saturating_add(self, other: Money) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse a decimal amount such as `10`, `10.5`, `$10.00`.
    pub fn parse(raw: &str) -> Result<Self, MoneyParseError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        if digits.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if digits.starts_with('-') {
            return Err(MoneyParseError::Negative(raw.to_string()));
        }

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(MoneyParseError::Invalid(raw.to_string()));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyParseError::Invalid(raw.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(raw.to_string()));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::Overflow(raw.to_string()))?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => u64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => fraction
                .parse()
                .map_err(|_| MoneyParseError::Invalid(raw.to_string()))?,
        };

        whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| MoneyParseError::Overflow(raw.to_string()))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        format!(
            "{}.{:02}",
            value.0 / CENTS_PER_UNIT,
            value.0 % CENTS_PER_UNIT
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}.{:02}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT
        )
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}
