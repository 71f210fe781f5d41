//! Application Layer
//!
//! Use cases orchestrating the domain through ports, plus the DTOs the
//! delivery layer exchanges with them.

pub mod dto;
pub mod ports;
pub mod use_cases;
