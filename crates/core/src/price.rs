//! Price value object.
//!
//! Prices are carried in the smallest currency unit (cents) to keep cart
//! totals an exact linear sum. Display is always two decimals; there is no
//! multi-currency handling and no rounding policy beyond that.

use core::iter::Sum;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A price in integer cents. Compared and summed by value.
///
/// On the wire (and in persisted carts) a price is the backend's plain
/// decimal number, so serde converts through `as_decimal`/`from_decimal`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Build from major/minor units, e.g. `Price::from_major_minor(75, 50)`
    /// for 75.50. `minor` must be a two-digit fraction (0..=99).
    pub fn from_major_minor(major: u64, minor: u64) -> Self {
        debug_assert!(minor < 100);
        Self(major * 100 + minor)
    }

    /// Convert a decimal amount as reported by the backend (e.g. `75.5`).
    /// Rounds to the nearest cent.
    pub fn from_decimal(amount: f64) -> Self {
        Self((amount * 100.0).round().max(0.0) as u64)
    }

    pub fn as_cents(&self) -> u64 {
        self.0
    }

    /// Decimal amount for the wire (the backend speaks plain numbers).
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl core::ops::Add for Price {
    type Output = Price;

    /// Saturating: cart totals must never panic, even on absurd amounts.
    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, p| acc + p)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(D::Error::custom(format!("invalid price amount: {amount}")));
        }
        Ok(Price::from_decimal(amount))
    }
}
