//! Delivery Fee Calculation
//!
//! Tiered business rules mapping cart contents to an integer fee. The
//! rules are evaluated strictly in priority order; the five-item flat
//! tier is a deliberate business quirk, not a derivable formula, and
//! must not be folded into the per-item rule.

use rust_decimal::Decimal;

use crate::domain::cart::Cart;
use crate::domain::shared::Money;

/// Flat fee applied when the subtotal is below the small-order threshold.
const SMALL_ORDER_FEE: i64 = 20;

/// Subtotal below which the small-order flat fee applies.
const SMALL_ORDER_THRESHOLD: i64 = 100;

/// Fixed fee for carts holding exactly this many units.
const FLAT_TIER_ITEM_COUNT: u32 = 5;

/// Fee charged at the fixed five-item tier.
const FLAT_TIER_FEE: i64 = 120;

/// Per-unit fee used by the proportional rule.
const PER_ITEM_FEE: i64 = 30;

/// Ceiling on the proportional fee.
const FEE_CAP: i64 = 200;

/// Compute the delivery fee for a cart.
///
/// Rules, evaluated in priority order:
///
/// 1. Every seller in the cart offers free delivery → fee is 0.
/// 2. Subtotal below 100 currency units → flat fee of 20.
/// 3. Exactly 5 units across all lines → fixed fee of 120. This tier is
///    intentionally non-proportional; a 6-item cart can cost less to
///    deliver than a 5-item one.
/// 4. Otherwise 30 per unit, capped at 200.
///
/// Deterministic and independent of line ordering: every rule reads only
/// aggregates of the cart (subtotal, unit count, seller flags).
#[must_use]
pub fn compute_delivery_fee(cart: &Cart) -> Money {
    if cart.all_sellers_free_delivery() {
        return Money::ZERO;
    }
    if cart.subtotal() < Money::from_units(SMALL_ORDER_THRESHOLD) {
        return Money::from_units(SMALL_ORDER_FEE);
    }
    let item_count = cart.total_item_count();
    if item_count == FLAT_TIER_ITEM_COUNT {
        return Money::from_units(FLAT_TIER_FEE);
    }
    let proportional = PER_ITEM_FEE.saturating_mul(i64::from(item_count));
    Money::new(Decimal::from(proportional.min(FEE_CAP)))
}
