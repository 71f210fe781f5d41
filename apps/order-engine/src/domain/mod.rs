//! Domain Layer
//!
//! Pure business logic: aggregates, value objects, domain services, and
//! the persistence ports the infrastructure layer implements. Nothing in
//! here performs I/O.

pub mod cart;
pub mod inventory;
pub mod notifications;
pub mod orders;
pub mod pricing;
pub mod shared;
