//! HTTP Adapter
//!
//! Axum REST + SSE surface that delegates to application use cases.

pub mod controller;
pub mod response;

pub use controller::{AppState, create_router};
