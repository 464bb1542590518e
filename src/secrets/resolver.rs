//! Secret resolution with per-reference failure isolation.
//!
//! A failed lookup only affects the entry that referenced the secret; the
//! resolver logs the failure and reports "no value" so that the rest of the
//! configuration keeps loading.

use tracing::{debug, error, warn, Instrument};

use super::client::SecretSource;
use super::error::SecretsError;
use super::types::SecretString;

/// Build the secret identifier for a `_secret` parameter value.
///
/// The value is used as-is when it is an ARN, when no prefix is configured,
/// or when it already sits under the prefix (`prod/db` for prefix `prod`, but
/// not `production-db`). Otherwise the prefix and the value are joined with a
/// single `/`.
pub fn compose_secret_id(secrets_prefix: &str, value: &str) -> String {
    let value = value.trim();
    let prefix = secrets_prefix.trim_end_matches('/');
    if value.starts_with("arn:") || secrets_prefix.is_empty() || is_under_prefix(value, prefix) {
        return value.to_string();
    }

    format!("{}/{}", prefix, value.trim_start_matches('/'))
}

fn is_under_prefix(value: &str, prefix: &str) -> bool {
    match value.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Fetches raw secret payloads, mapping every failure to `None`.
pub struct SecretResolver<'a, S: SecretSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SecretSource + ?Sized> SecretResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetch the payload for `secret_id`.
    ///
    /// Returns `None` on any backend error and when the secret has no string
    /// value; both cases are logged.
    pub async fn fetch_secret(&self, secret_id: &str) -> Option<SecretString> {
        let span =
            crate::backend_span!("get_secret_value", self.source.name(), secret_id = %secret_id);

        match self.source.get_secret_value(secret_id).instrument(span).await {
            Ok(Some(secret)) if !secret.is_empty() => {
                debug!(secret_id = %secret_id, length = secret.len(), "Fetched secret payload");
                Some(secret)
            }
            Ok(_) => {
                error!(secret_id = %secret_id, "Secret value is empty or absent");
                None
            }
            Err(SecretsError::NotFound { .. }) => {
                error!(secret_id = %secret_id, "Secret not found in secret store");
                None
            }
            Err(e @ SecretsError::AuthenticationFailed { .. }) => {
                error!(secret_id = %secret_id, error = %e, "Access to secret denied");
                None
            }
            Err(e) => {
                warn!(secret_id = %secret_id, error = %e, "Error fetching secret from secret store");
                None
            }
        }
    }
}
