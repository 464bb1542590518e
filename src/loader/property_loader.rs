//! Single-pass loader: parameters in, property source and database settings out.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::LoaderSettings;
use crate::errors::{LoaderError, Result};
use crate::parameters::{fetch_all, ConfigEntry, ParameterSource};
use crate::properties::{MapPropertySource, PropertySource, SystemProperties};
use crate::secrets::{
    compose_secret_id, extract, is_secret_reference, DatabaseSettings, SecretResolver,
    SecretSource,
};

/// Name under which the loaded parameters are exposed.
pub const PROPERTY_SOURCE_NAME: &str = "aws-parameter-store";

/// Loader lifecycle.
///
/// ```text
/// Init ──load──► FetchingParams ──► Ready ──close──► Closed
///                      └─(fatal)──► Failed ──close──► Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Init,
    FetchingParams,
    Ready,
    Failed,
    Closed,
}

impl fmt::Display for LoaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Init => "init",
            Self::FetchingParams => "fetching_params",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProperties {
    /// Every fetched parameter by short key, `_secret` entries included
    pub source: MapPropertySource,
    /// Fields resolved from all `_secret` entries, later entries winning
    pub database: DatabaseSettings,
}

impl PropertySource for LoadedProperties {
    fn name(&self) -> &str {
        self.source.name()
    }

    fn get_property(&self, name: &str) -> Option<&str> {
        self.source.get_property(name)
    }

    fn property_names(&self) -> Vec<&str> {
        self.source.property_names()
    }
}

/// Loads configuration from a [`ParameterSource`] and resolves `_secret`
/// entries through a [`SecretSource`].
///
/// A loader runs once. Backend handles stay open until [`close`](Self::close).
pub struct PropertyLoader<P: ParameterSource, S: SecretSource> {
    parameters: P,
    secrets: S,
    settings: LoaderSettings,
    system_properties: Option<Arc<SystemProperties>>,
    state: LoaderState,
}

impl<P: ParameterSource, S: SecretSource> PropertyLoader<P, S> {
    /// Resolved fields go to [`SystemProperties::global`] unless
    /// `settings.publish_system_properties` is off.
    pub fn new(parameters: P, secrets: S, settings: LoaderSettings) -> Self {
        let system_properties =
            settings.publish_system_properties.then(SystemProperties::global);
        Self { parameters, secrets, settings, system_properties, state: LoaderState::Init }
    }

    /// Publish resolved fields into `properties` instead of the global namespace.
    pub fn with_system_properties(mut self, properties: Arc<SystemProperties>) -> Self {
        self.system_properties = Some(properties);
        self
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn parameter_source(&self) -> &P {
        &self.parameters
    }

    pub fn secret_source(&self) -> &S {
        &self.secrets
    }

    /// Fetch all parameters and resolve secret references.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::InvalidState`] unless the loader is fresh
    /// - any parameter store failure
    /// - a resolved secret whose payload is not a JSON object
    ///
    /// A secret that cannot be fetched is logged and skipped.
    pub async fn load(&mut self) -> Result<LoadedProperties> {
        if self.state != LoaderState::Init {
            return Err(LoaderError::invalid_state(format!(
                "load requires a fresh loader, current state is {}",
                self.state
            )));
        }

        self.state = LoaderState::FetchingParams;
        let result = self.load_entries().await;
        match result {
            Ok(loaded) => {
                self.state = LoaderState::Ready;
                info!(
                    properties = loaded.source.len(),
                    database_fields = loaded.database.present_fields().len(),
                    "Loaded configuration"
                );
                Ok(loaded)
            }
            Err(e) => {
                self.state = LoaderState::Failed;
                Err(e)
            }
        }
    }

    async fn load_entries(&self) -> Result<LoadedProperties> {
        let entries = fetch_all(&self.parameters, &self.settings.parameter_prefix).await?;

        let resolver = SecretResolver::new(&self.secrets);
        let mut source = MapPropertySource::new(PROPERTY_SOURCE_NAME);
        let mut database = DatabaseSettings::default();

        for entry in entries {
            if is_secret_reference(&entry.key) {
                if let Some(resolved) = self.resolve_entry(&resolver, &entry).await? {
                    database.merge(resolved);
                }
            }
            source.insert(entry);
        }

        Ok(LoadedProperties { source, database })
    }

    async fn resolve_entry(
        &self,
        resolver: &SecretResolver<'_, S>,
        entry: &ConfigEntry,
    ) -> Result<Option<DatabaseSettings>> {
        let secret_id = compose_secret_id(&self.settings.secrets_prefix, &entry.value);
        debug!(key = %entry.key, secret_id = %secret_id, "Resolving secret reference");

        let Some(payload) = resolver.fetch_secret(&secret_id).await else {
            warn!(key = %entry.key, secret_id = %secret_id, "Secret reference left unresolved");
            return Ok(None);
        };

        let resolved = extract(&payload)?;
        if let Some(properties) = &self.system_properties {
            properties.publish(&resolved);
        }
        Ok(Some(resolved))
    }

    /// Release both backend handles.
    ///
    /// Close failures are logged. Calling this again is a no-op.
    pub async fn close(&mut self) {
        if self.state == LoaderState::Closed {
            debug!("Loader already closed");
            return;
        }

        if let Err(e) = self.parameters.close().await {
            warn!(backend = self.parameters.name(), error = %e, "Failed to close parameter client");
        }
        if let Err(e) = self.secrets.close().await {
            warn!(backend = self.secrets.name(), error = %e, "Failed to close secret client");
        }

        self.state = LoaderState::Closed;
        info!("Closed backend clients");
    }
}

impl<P: ParameterSource, S: SecretSource> fmt::Debug for PropertyLoader<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyLoader")
            .field("parameters", &self.parameters.name())
            .field("secrets", &self.secrets.name())
            .field("settings", &self.settings)
            .field("state", &self.state)
            .finish()
    }
}
