//! Application Ports
//!
//! Driven-side interfaces the use cases depend on. Infrastructure
//! adapters implement these; tests substitute mocks or the provided
//! no-op / in-memory implementations.

mod checkout_store_port;
mod directory_port;
mod event_publisher_port;
mod side_effect_port;

pub use checkout_store_port::{CheckoutReceipt, CheckoutStoreError, CheckoutStorePort};
pub use directory_port::{DirectoryError, DirectoryPort, StaticDirectory};
pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
pub use side_effect_port::{NoOpSideEffects, SideEffectError, SideEffectPort};
