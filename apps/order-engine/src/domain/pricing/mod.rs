//! Pricing Domain Services
//!
//! Pure delivery fee computation over cart contents. No I/O, no clock,
//! no configuration lookups.

mod delivery_fee;

pub use delivery_fee::compute_delivery_fee;
