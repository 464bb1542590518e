//! Secret resolution for `_secret` parameters.
//!
//! A parameter whose short key ends with `_secret` holds a secret identifier
//! instead of a literal value. This module turns such an identifier into
//! database connection settings:
//!
//! ```text
//! parameter value ──compose_secret_id──► secret id
//!     ──SecretResolver──► SecretString payload
//!     ──extract──► DatabaseSettings
//! ```
//!
//! - [`SecretSource`] is the backend seam, implemented by
//!   [`SecretsManagerSource`] for AWS Secrets Manager.
//! - [`SecretResolver`] isolates backend failures: it logs them and returns
//!   `None` so that one broken reference never aborts the load.
//! - [`extract`] parses the payload; a payload that is not a JSON object is the
//!   only failure that propagates.
//!
//! Secret values are carried as [`SecretString`] and are never logged.

pub mod aws;
pub mod client;
pub mod error;
pub mod extractor;
pub mod resolver;
pub mod types;

pub use aws::SecretsManagerSource;
pub use client::SecretSource;
pub use error::{Result, SecretsError};
pub use extractor::{extract, DatabaseField, DatabaseSettings};
pub use resolver::{compose_secret_id, SecretResolver};
pub use types::SecretString;

/// Short-key suffix that marks a parameter as a secret reference.
pub const SECRET_SUFFIX: &str = "_secret";

/// Whether a short key refers to a secret.
pub fn is_secret_reference(key: &str) -> bool {
    key.ends_with(SECRET_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_secret_reference() {
        assert!(is_secret_reference("db_secret"));
        assert!(is_secret_reference("/nested/db_secret"));
        assert!(!is_secret_reference("db_secret_name"));
        assert!(!is_secret_reference("secret"));
        assert!(!is_secret_reference("db_Secret"));
    }
}
