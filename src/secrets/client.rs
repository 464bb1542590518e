//! Secret store capability.

use async_trait::async_trait;

use super::error::Result;
use super::types::SecretString;

/// Read access to a remote secret store.
///
/// This is the seam between the loader and the secrets backend: production
/// code uses [`SecretsManagerSource`](super::SecretsManagerSource), tests use
/// in-memory fakes.
///
/// Implementations MUST NOT log secret values.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetch the string payload of a secret.
    ///
    /// Returns `Ok(None)` when the secret exists but carries no string value
    /// (for example a binary-only secret).
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`](super::SecretsError::NotFound) if the secret doesn't exist
    /// - [`SecretsError::AuthenticationFailed`](super::SecretsError::AuthenticationFailed) if access is denied
    /// - [`SecretsError::ConnectionFailed`](super::SecretsError::ConnectionFailed) if the backend is unreachable
    async fn get_secret_value(&self, secret_id: &str) -> Result<Option<SecretString>>;

    /// Release the underlying client handle.
    ///
    /// After a successful close every further call fails with
    /// [`SecretsError::ClientClosed`](super::SecretsError::ClientClosed).
    async fn close(&self) -> Result<()> {
        Ok(())
    }

    /// Name of this source for logging
    fn name(&self) -> &'static str;
}
