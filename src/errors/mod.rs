//! # Error Handling
//!
//! Error types for the configuration loader, built with `thiserror`.
//!
//! Errors fall into two classes. Fatal errors abort the load and are returned
//! to the caller (the parameter store is unreachable, a secret payload is not
//! JSON, the settings are invalid). Recoverable errors are confined to a
//! single secret reference and are logged by the loader instead of returned.

pub mod types;

pub use types::{LoaderError, Result};
