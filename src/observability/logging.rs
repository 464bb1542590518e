//! # Structured Logging
//!
//! Subscriber setup and span macros built on the tracing ecosystem.
//!
//! Secret values never reach a log line: they travel as
//! [`SecretString`](crate::secrets::SecretString), whose `Debug` and
//! `Display` output is redacted.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{LoaderSettings, ObservabilityConfig};

/// Create a tracing span for a backend call.
///
/// ```rust,ignore
/// let span = backend_span!("get_parameters_by_path", "ssm", path = %prefix);
/// ```
#[macro_export]
macro_rules! backend_span {
    ($operation:expr, $backend:expr) => {
        tracing::debug_span!(
            "backend_call",
            operation = %$operation,
            backend = %$backend
        )
    };
    ($operation:expr, $backend:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "backend_call",
            operation = %$operation,
            backend = %$backend,
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set. Returns `false` when a
/// subscriber was already installed (integration tests, embedding hosts).
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let result = if config.json_logging {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().with_env_filter(filter).json().finish(),
        )
    } else {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().with_env_filter(filter).finish(),
        )
    };

    result.is_ok()
}

/// Log loader settings at startup
pub fn log_settings_info(settings: &LoaderSettings) {
    tracing::info!(
        parameter_prefix = %settings.parameter_prefix,
        secrets_prefix = %settings.secrets_prefix,
        secrets_endpoint = %settings.secrets_endpoint,
        parameter_endpoint = ?settings.parameter_endpoint,
        region = ?settings.region,
        publish_system_properties = settings.publish_system_properties,
        connect_timeout_seconds = settings.connect_timeout_seconds,
        "Parameter store loader configuration"
    );
}
