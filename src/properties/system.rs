//! Process-wide system properties.
//!
//! Resolved database fields are published here under fixed keys (`DB_HOST`,
//! `DB_PASSWORD`, ...) for code that reads configuration through ambient
//! lookup rather than from the [`LoadedProperties`](crate::loader::LoadedProperties)
//! returned by the loader.
//!
//! The namespace is internally synchronized, but the loader expects to be
//! its only writer while a load is running. Mutating it from elsewhere during
//! startup can interleave with published values.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::secrets::DatabaseSettings;

static GLOBAL: Lazy<Arc<SystemProperties>> = Lazy::new(|| Arc::new(SystemProperties::new()));

/// String-keyed property namespace.
#[derive(Debug, Default)]
pub struct SystemProperties {
    values: RwLock<HashMap<String, String>>,
}

impl SystemProperties {
    /// Fresh, empty namespace (tests and embedded use).
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide namespace.
    pub fn global() -> Arc<SystemProperties> {
        Arc::clone(&GLOBAL)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.write().unwrap_or_else(|e| e.into_inner()).insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().unwrap_or_else(|e| e.into_inner()).remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.read().unwrap_or_else(|e| e.into_inner()).keys().cloned().collect()
    }

    /// Write every present field of `settings` under its `DB_*` key.
    ///
    /// Absent fields leave existing values untouched.
    pub fn publish(&self, settings: &DatabaseSettings) -> usize {
        let properties = settings.properties();
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        for (key, value) in &properties {
            values.insert((*key).to_string(), (*value).to_string());
        }
        debug!(count = properties.len(), "Published database properties");
        properties.len()
    }
}
