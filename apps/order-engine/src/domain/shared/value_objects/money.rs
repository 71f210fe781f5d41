//! Monetary amounts in marketplace currency units.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// An exact currency amount.
///
/// Backed by a `Decimal` so line totals never accumulate float error.
/// Catalog prices carry at most two decimal places; delivery fees are
/// whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// No money at all. Free-delivery orders carry this fee.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap an exact decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Whole currency units, the form fee constants are written in.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::new(units, 0))
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Reject amounts that cannot appear on an order.
    ///
    /// # Errors
    ///
    /// Negative amounts fail; zero is fine (free delivery).
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.is_negative() {
            return Err(DomainError::invalid_value(
                "amount",
                "order amounts cannot be negative",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
