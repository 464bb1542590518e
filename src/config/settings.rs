//! # Configuration Settings
//!
//! Inbound settings for the loader and the logging setup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::aws::EndpointHint;
use crate::errors::{LoaderError, Result};

/// Environment variable prefix for loader settings (`PARAMSTORE_PARAMETER_PREFIX`, ...)
pub const ENV_PREFIX: &str = "PARAMSTORE";

fn default_publish_system_properties() -> bool {
    true
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

/// Settings supplied by the hosting application before the load.
///
/// The three inbound values have no defaults:
/// - `parameter_prefix`: path queried in the parameter store, e.g. `/myapp/prod/`
/// - `secrets_prefix`: prefix used to build secret identifiers from `_secret` values
/// - `secrets_endpoint`: Secrets Manager endpoint URL or region name
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct LoaderSettings {
    #[validate(length(min = 1, message = "Parameter prefix cannot be empty"))]
    pub parameter_prefix: String,

    #[validate(length(min = 1, message = "Secrets prefix cannot be empty"))]
    pub secrets_prefix: String,

    #[validate(length(min = 1, message = "Secrets endpoint cannot be empty"))]
    pub secrets_endpoint: String,

    /// Optional SSM endpoint override (LocalStack, VPC endpoint)
    #[serde(default)]
    pub parameter_endpoint: Option<String>,

    /// AWS region for both clients unless an endpoint names its own
    #[serde(default)]
    pub region: Option<String>,

    /// Also write resolved database fields into [`SystemProperties::global`](crate::properties::SystemProperties::global)
    #[serde(default = "default_publish_system_properties")]
    pub publish_system_properties: bool,

    /// HTTP connect timeout for both backends
    #[serde(default = "default_connect_timeout_seconds")]
    #[validate(range(
        min = 1,
        max = 300,
        message = "Connect timeout must be between 1 and 300 seconds"
    ))]
    pub connect_timeout_seconds: u64,
}

/// Values that take precedence over file and environment settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub parameter_prefix: Option<String>,
    pub secrets_prefix: Option<String>,
    pub secrets_endpoint: Option<String>,
    pub parameter_endpoint: Option<String>,
    pub region: Option<String>,
    pub publish_system_properties: Option<bool>,
}

impl LoaderSettings {
    pub fn new(
        parameter_prefix: impl Into<String>,
        secrets_prefix: impl Into<String>,
        secrets_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            parameter_prefix: parameter_prefix.into(),
            secrets_prefix: secrets_prefix.into(),
            secrets_endpoint: secrets_endpoint.into(),
            parameter_endpoint: None,
            region: None,
            publish_system_properties: default_publish_system_properties(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }

    /// Load settings from an optional file, `PARAMSTORE_*` environment
    /// variables and explicit overrides, in increasing order of precedence.
    ///
    /// The file format follows its extension (`.toml`, `.yaml`, `.json`).
    pub fn load(file: Option<&Path>, overrides: &SettingsOverrides) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("publish_system_properties", default_publish_system_properties())?
            .set_default("connect_timeout_seconds", default_connect_timeout_seconds())?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: LoaderSettings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("parameter_prefix", overrides.parameter_prefix.clone())?
            .set_override_option("secrets_prefix", overrides.secrets_prefix.clone())?
            .set_override_option("secrets_endpoint", overrides.secrets_endpoint.clone())?
            .set_override_option("parameter_endpoint", overrides.parameter_endpoint.clone())?
            .set_override_option("region", overrides.region.clone())?
            .set_override_option("publish_system_properties", overrides.publish_system_properties)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(LoaderError::from)?;
        self.validate_custom()
    }

    /// Checks the validator derive cannot express
    fn validate_custom(&self) -> Result<()> {
        // SSM parameter paths are absolute
        if !self.parameter_prefix.starts_with('/') {
            return Err(LoaderError::validation_field(
                "Parameter prefix must start with '/'",
                "parameter_prefix",
            ));
        }

        EndpointHint::parse(&self.secrets_endpoint)?;

        if let Some(endpoint) = &self.parameter_endpoint {
            if !matches!(EndpointHint::parse(endpoint)?, EndpointHint::Url(_)) {
                return Err(LoaderError::validation_field(
                    "Parameter endpoint must be an http(s) URL",
                    "parameter_endpoint",
                ));
            }
        }

        if let Some(region) = &self.region {
            if !matches!(EndpointHint::parse(region), Ok(EndpointHint::Region(_))) {
                return Err(LoaderError::validation_field(
                    format!("Invalid AWS region '{}'", region),
                    "region",
                ));
            }
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Service name attached to log output
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let log_level = std::env::var("PARAMSTORE_LOG_LEVEL").unwrap_or(defaults.log_level);

        let json_logging = std::env::var("PARAMSTORE_JSON_LOGGING")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(defaults.json_logging);

        Self { service_name: defaults.service_name, log_level, json_logging }
    }
}
