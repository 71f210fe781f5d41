//! Infrastructure Layer
//!
//! Adapters on both sides of the hexagon: HTTP in, persistence and the
//! realtime change feed out.

pub mod config;
pub mod http;
pub mod persistence;
pub mod realtime;
