//! Loader wired to AWS Systems Manager and Secrets Manager.

use aws_config::SdkConfig;

use super::property_loader::{LoadedProperties, PropertyLoader};
use crate::aws::{load_sdk_config, secrets_manager_client, ssm_client};
use crate::config::LoaderSettings;
use crate::errors::Result;
use crate::parameters::SsmParameterSource;
use crate::properties::PropertySource;
use crate::secrets::{DatabaseSettings, SecretsManagerSource};

pub type AwsPropertyLoader = PropertyLoader<SsmParameterSource, SecretsManagerSource>;

/// Build an unloaded loader with one client per backend.
///
/// Each client takes its region from its own endpoint setting when that names
/// one, then from the shared region (see [`crate::aws`]).
pub fn build_loader(settings: LoaderSettings, sdk_config: &SdkConfig) -> Result<AwsPropertyLoader> {
    settings.validate()?;

    let ssm = ssm_client(sdk_config, &settings)?;
    let secretsmanager = secrets_manager_client(sdk_config, &settings)?;

    Ok(PropertyLoader::new(
        SsmParameterSource::new(ssm),
        SecretsManagerSource::new(secretsmanager),
        settings,
    ))
}

/// Loaded AWS-backed property source.
///
/// Construction performs the full load; the backend clients stay open
/// until [`close`](Self::close).
#[derive(Debug)]
pub struct AwsPropertySource {
    loader: AwsPropertyLoader,
    properties: LoadedProperties,
}

impl AwsPropertySource {
    /// Connect with the SDK default credential and region chain, then load.
    pub async fn connect(settings: LoaderSettings) -> Result<Self> {
        settings.validate()?;
        let sdk_config = load_sdk_config(&settings).await?;
        Self::connect_with_config(settings, &sdk_config).await
    }

    /// Load using an already resolved SDK configuration.
    pub async fn connect_with_config(settings: LoaderSettings, sdk_config: &SdkConfig) -> Result<Self> {
        let mut loader = build_loader(settings, sdk_config)?;
        match loader.load().await {
            Ok(properties) => Ok(Self { loader, properties }),
            Err(e) => {
                loader.close().await;
                Err(e)
            }
        }
    }

    pub fn properties(&self) -> &LoadedProperties {
        &self.properties
    }

    pub fn database(&self) -> &DatabaseSettings {
        &self.properties.database
    }

    /// Release both clients; safe to call more than once.
    pub async fn close(&mut self) {
        self.loader.close().await;
    }
}

impl PropertySource for AwsPropertySource {
    fn name(&self) -> &str {
        self.properties.name()
    }

    fn get_property(&self, name: &str) -> Option<&str> {
        self.properties.get_property(name)
    }

    fn property_names(&self) -> Vec<&str> {
        self.properties.property_names()
    }
}
