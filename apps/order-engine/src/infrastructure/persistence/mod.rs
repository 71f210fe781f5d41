//! Persistence Adapters
//!
//! Storage implementations of the domain repository ports and the
//! checkout store port: a turso-backed adapter for production and an
//! in-memory adapter for testing, including the stepwise commit with
//! failure injection used to exercise the partial-commit path.

pub mod in_memory;
pub mod turso_store;

pub use in_memory::{FailurePoint, InMemoryStore};
pub use turso_store::TursoStore;
