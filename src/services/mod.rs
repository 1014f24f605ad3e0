//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI.

mod lead_service;
pub mod rate_limit;

pub use lead_service::*;
pub use rate_limit::{FixedWindowLimiter, RateDecision};
