//! # Observability Infrastructure
//!
//! Structured logging for the loader: subscriber setup and span helpers
//! for calls into the parameter and secret backends.

pub mod logging;

pub use logging::{init_logging, log_settings_info};
