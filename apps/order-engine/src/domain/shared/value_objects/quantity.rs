//! Unit counts on cart and order lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// How many units of one product a line carries.
///
/// Zero is representable because cart updates use it to mean "remove
/// this line", but it can never survive onto a committed order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// The removal sentinel for cart updates.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw unit count.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self(count)
    }

    /// The raw unit count.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.0
    }

    /// Whether this is the removal sentinel.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Accumulate without overflow; repeated cart adds clamp at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Reject counts that cannot appear on a committed order line.
    ///
    /// # Errors
    ///
    /// Zero fails; anything positive passes.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.is_zero() {
            return Err(DomainError::invalid_value(
                "quantity",
                "line item quantity must be at least 1",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_the_raw_count() {
        let q = Quantity::new(5);
        assert_eq!(q.count(), 5);
        assert_eq!(format!("{q}"), "5");
    }

    #[test]
    fn zero_is_the_removal_sentinel() {
        assert!(Quantity::ZERO.is_zero());
        assert!(!Quantity::new(1).is_zero());
    }

    #[test]
    fn accumulation_saturates_instead_of_wrapping() {
        let max = Quantity::new(u32::MAX);
        assert_eq!(max.saturating_add(Quantity::new(1)), max);
        assert_eq!(
            Quantity::new(2).saturating_add(Quantity::new(3)),
            Quantity::new(5)
        );
    }

    #[test]
    fn committed_lines_require_at_least_one_unit() {
        assert!(Quantity::ZERO.validate_for_order().is_err());
        assert!(Quantity::new(1).validate_for_order().is_ok());
    }
}
