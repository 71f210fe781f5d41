// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Engine - Marketplace Order Core
//!
//! Order placement, fulfillment, and realtime synchronization for a
//! multi-role marketplace (buyers, sellers, platform admins).
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `cart`: the buyer's session-owned cart aggregate
//!   - `pricing`: the tiered delivery fee calculator
//!   - `orders`: the order aggregate, status state machine, and ownership rules
//!   - `inventory`: per-product stock ledger contract
//!   - `notifications`: durable notification records and inbox port
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: interfaces for storage, directory, side effects, and the
//!     realtime publisher
//!   - `use_cases`: `PlaceOrder`, `AdvanceOrderStatus`, `ListOrders`,
//!     `NotifyOrderPlaced`, `NotificationInbox`
//!   - `dto`: data transfer objects for the API boundary
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: turso and in-memory stores
//!   - `realtime`: broadcast-channel change feed behind the SSE endpoints
//!   - `http`: axum REST + SSE controller
//!   - `config`: environment settings

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod observability;

pub use infrastructure::config::Settings;
