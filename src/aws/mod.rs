//! # AWS Clients
//!
//! Builds the SSM and Secrets Manager SDK clients from [`LoaderSettings`].
//! Credentials come from the SDK default provider chain (environment, shared
//! profile, web identity, container and instance metadata).
//!
//! ## Region resolution
//!
//! Each client resolves its own region:
//!
//! 1. The region named by that service's endpoint hint (a bare region such as
//!    `us-east-1`, or a URL whose host is `<service>.<region>.amazonaws.com`)
//! 2. `region` from the settings
//! 3. The region named by the secrets endpoint hint
//! 4. The SDK default chain (`AWS_REGION`, shared profile, instance metadata)

pub mod error;
pub mod handle;

pub use error::sdk_error;
pub use handle::ClientHandle;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::info;
use url::Url;

use crate::config::LoaderSettings;
use crate::errors::{LoaderError, Result};

/// How an endpoint setting was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointHint {
    /// Explicit endpoint URL (LocalStack, VPC endpoint, FIPS endpoint)
    Url(Url),
    /// Region name; the SDK derives the public endpoint from it
    Region(String),
}

impl EndpointHint {
    pub fn parse(hint: &str) -> Result<Self> {
        let hint = hint.trim();
        if hint.starts_with("http://") || hint.starts_with("https://") {
            let url = Url::parse(hint).map_err(|e| {
                LoaderError::config_with_source(format!("Invalid endpoint URL: {}", hint), Box::new(e))
            })?;
            return Ok(Self::Url(url));
        }

        if hint.is_empty() || !hint.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(LoaderError::validation_field(
                format!("Expected a region name or an http(s) URL, got '{}'", hint),
                "secrets_endpoint",
            ));
        }

        Ok(Self::Region(hint.to_string()))
    }

    /// Region named by the hint, if any.
    pub fn region(&self) -> Option<String> {
        match self {
            Self::Region(region) => Some(region.clone()),
            Self::Url(url) => region_from_host(url.host_str()?),
        }
    }

    /// Endpoint override for the SDK client, without the trailing slash `Url` adds.
    pub fn endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url.as_str().trim_end_matches('/')),
            Self::Region(_) => None,
        }
    }
}

/// Extract `<region>` from hosts like `secretsmanager.<region>.amazonaws.com`.
fn region_from_host(host: &str) -> Option<String> {
    let mut labels = host.split('.');
    let _service = labels.next()?;
    let region = labels.next()?;
    let rest: Vec<&str> = labels.collect();
    let is_aws = matches!(rest.as_slice(), ["amazonaws", "com"] | ["amazonaws", "com", "cn"]);
    (is_aws && !region.is_empty()).then(|| region.to_string())
}

fn secrets_hint(settings: &LoaderSettings) -> Result<EndpointHint> {
    EndpointHint::parse(&settings.secrets_endpoint)
}

fn parameter_hint(settings: &LoaderSettings) -> Result<Option<EndpointHint>> {
    settings.parameter_endpoint.as_deref().map(EndpointHint::parse).transpose()
}

/// Region shared by both clients unless a service hint names its own.
pub fn shared_region(settings: &LoaderSettings) -> Result<Option<String>> {
    let configured = settings.region.clone().filter(|r| !r.trim().is_empty());
    Ok(configured.or(secrets_hint(settings)?.region()))
}

fn timeouts(settings: &LoaderSettings) -> TimeoutConfig {
    TimeoutConfig::builder().connect_timeout(settings.connect_timeout()).build()
}

fn missing_region(service: &str) -> LoaderError {
    LoaderError::config(format!(
        "Unable to determine AWS region for {}: set AWS_REGION, the region setting or use a region as secrets endpoint",
        service
    ))
}

/// Load the shared SDK configuration through the default provider chain.
pub async fn load_sdk_config(settings: &LoaderSettings) -> Result<SdkConfig> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = shared_region(settings)? {
        loader = loader.region(Region::new(region));
    }

    let config = loader.load().await;
    if config.region().is_none() {
        return Err(missing_region("the AWS clients"));
    }
    Ok(config)
}

/// SSM client honoring `parameter_endpoint` and its region.
pub fn ssm_client(base: &SdkConfig, settings: &LoaderSettings) -> Result<aws_sdk_ssm::Client> {
    let hint = parameter_hint(settings)?;
    let region = hint.as_ref().and_then(EndpointHint::region).or(shared_region(settings)?);

    let mut builder = aws_sdk_ssm::config::Builder::from(base).timeout_config(timeouts(settings));
    if let Some(region) = region {
        builder = builder.region(Region::new(region));
    }
    if let Some(endpoint) = hint.as_ref().and_then(EndpointHint::endpoint_url) {
        builder = builder.endpoint_url(endpoint);
    }

    let config = builder.build();
    let Some(region) = config.region() else {
        return Err(missing_region("ssm"));
    };
    info!(region = %region, endpoint = ?settings.parameter_endpoint, "Created SSM client");
    Ok(aws_sdk_ssm::Client::from_conf(config))
}

/// Secrets Manager client honoring `secrets_endpoint`.
pub fn secrets_manager_client(
    base: &SdkConfig,
    settings: &LoaderSettings,
) -> Result<aws_sdk_secretsmanager::Client> {
    let hint = secrets_hint(settings)?;
    let region = hint.region().or(shared_region(settings)?);

    let mut builder =
        aws_sdk_secretsmanager::config::Builder::from(base).timeout_config(timeouts(settings));
    if let Some(region) = region {
        builder = builder.region(Region::new(region));
    }
    if let Some(endpoint) = hint.endpoint_url() {
        builder = builder.endpoint_url(endpoint);
    }

    let config = builder.build();
    let Some(region) = config.region() else {
        return Err(missing_region("secretsmanager"));
    };
    info!(region = %region, endpoint = %settings.secrets_endpoint, "Created Secrets Manager client");
    Ok(aws_sdk_secretsmanager::Client::from_conf(config))
}

/// Static-credential SDK configuration without retries.
#[cfg(test)]
pub(crate) fn test_sdk_config(region: Option<&str>) -> SdkConfig {
    use aws_config::retry::RetryConfig;
    use aws_credential_types::provider::SharedCredentialsProvider;
    use aws_credential_types::Credentials;

    let mut builder = SdkConfig::builder()
        .behavior_version(BehaviorVersion::latest())
        .credentials_provider(SharedCredentialsProvider::new(Credentials::new(
            "AKIDEXAMPLE",
            "secret",
            None,
            None,
            "tests",
        )))
        .retry_config(RetryConfig::disabled());
    if let Some(region) = region {
        builder = builder.region(Region::new(region.to_string()));
    }
    builder.build()
}
