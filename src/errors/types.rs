//! # Error Types
//!
//! Crate-level error type for the parameter store loader.

use crate::secrets::SecretsError;

/// Custom result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Main error type for the configuration loader
#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Error response returned by an AWS service
    #[error("{service} request failed ({code}): {message}")]
    Backend { service: String, code: String, message: String, status: u16 },

    /// Network transport errors
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// Secret resolution errors that escalate to the load
    #[error(transparent)]
    Secrets(#[from] SecretsError),

    /// A backend client was used after `close()`
    #[error("{service} client is closed")]
    ClientClosed { service: String },

    /// Loader lifecycle violations (loading twice, loading after close)
    #[error("Invalid loader state: {message}")]
    InvalidState { message: String },
}

impl LoaderError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create a backend error from an AWS error envelope
    pub fn backend<S, C, M>(service: S, code: C, message: M, status: u16) -> Self
    where
        S: Into<String>,
        C: Into<String>,
        M: Into<String>,
    {
        Self::Backend { service: service.into(), code: code.into(), message: message.into(), status }
    }

    /// Create a transport error without an underlying source
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport { message: message.into(), source: None }
    }

    /// Create a transport error with source
    pub fn transport_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Transport { message: message.into(), source: Some(source) }
    }

    /// Create a client-closed error
    pub fn client_closed<S: Into<String>>(service: S) -> Self {
        Self::ClientClosed { service: service.into() }
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState { message: message.into() }
    }

    /// Backend error code, if this error came from an AWS error envelope
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            LoaderError::Backend { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether the application should refuse to start on this error.
    ///
    /// Every error that reaches the caller of a load is fatal except lifecycle
    /// misuse, which leaves already loaded properties intact.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LoaderError::InvalidState { .. })
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error, context: "JSON serialization failed".to_string() }
    }
}

impl From<config::ConfigError> for LoaderError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for LoaderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}
