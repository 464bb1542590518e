//! AWS Secrets Manager secret source.
//!
//! Calls `GetSecretValue` and returns the `SecretString` of the current
//! version. Binary secrets are reported as "no value".

use async_trait::async_trait;

use super::client::SecretSource;
use super::error::{Result, SecretsError};
use super::types::SecretString;
use crate::aws::{sdk_error, ClientHandle};
use crate::errors::LoaderError;

/// Secret source backed by AWS Secrets Manager.
#[derive(Debug)]
pub struct SecretsManagerSource {
    client: ClientHandle<aws_sdk_secretsmanager::Client>,
}

impl SecretsManagerSource {
    pub fn new(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client: ClientHandle::new("secretsmanager", client) }
    }

    pub fn client(&self) -> &aws_sdk_secretsmanager::Client {
        self.client.inner()
    }
}

/// Map SDK failures onto the secrets error taxonomy.
fn map_error(secret_id: &str, error: LoaderError) -> SecretsError {
    match error {
        LoaderError::Backend { code, message, .. } => match code.as_str() {
            "ResourceNotFoundException" => SecretsError::not_found(secret_id),
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "ExpiredTokenException" => {
                SecretsError::authentication_failed(format!("{}: {}", code, message))
            }
            _ => SecretsError::backend_error(format!("{}: {}", code, message)),
        },
        LoaderError::Transport { message, .. } => SecretsError::connection_failed(message),
        LoaderError::ClientClosed { .. } => SecretsError::ClientClosed,
        other => SecretsError::backend_error(other.to_string()),
    }
}

#[async_trait]
impl SecretSource for SecretsManagerSource {
    async fn get_secret_value(&self, secret_id: &str) -> Result<Option<SecretString>> {
        let client = self.client.get().map_err(|e| map_error(secret_id, e))?;
        let output = client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| map_error(secret_id, sdk_error("secretsmanager", "GetSecretValue", e)))?;

        let secret = output.secret_string().map(SecretString::new);
        if secret.is_none() {
            tracing::debug!(
                secret_id = %secret_id,
                name = ?output.name(),
                "Secret has no string value"
            );
        }
        Ok(secret)
    }

    async fn close(&self) -> Result<()> {
        self.client.close().map_err(|e| map_error("", e))
    }

    fn name(&self) -> &'static str {
        "secretsmanager"
    }
}
