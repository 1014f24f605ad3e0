//! System-level modules
//!
//! - Logging initialization
//! - Panic hook for server mode

pub mod logging;
pub mod panic_handler;
