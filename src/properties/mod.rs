//! # Property Publication
//!
//! Two namespaces receive the loaded configuration:
//!
//! - [`PropertySource`]: plain parameters by short key, including the raw
//!   `_secret` entries. This is what the hosting application enumerates.
//! - [`SystemProperties`]: resolved database fields under fixed `DB_*` keys.
//!
//! The namespaces are never merged. A consumer asks the property
//! source for plain configuration and the system properties (or the
//! [`DatabaseSettings`](crate::secrets::DatabaseSettings) returned by the
//! loader) for resolved secret fields.

pub mod source;
pub mod system;

pub use source::{MapPropertySource, PropertySource};
pub use system::SystemProperties;
