//! Enumerable property source handed to the hosting application.

use std::collections::HashMap;

use crate::parameters::ConfigEntry;

/// Named, enumerable key/value configuration.
pub trait PropertySource: Send + Sync {
    /// Name of this source
    fn name(&self) -> &str;

    /// Value of `name`, if present.
    fn get_property(&self, name: &str) -> Option<&str>;

    /// Every key this source can answer for.
    fn property_names(&self) -> Vec<&str>;

    fn contains_property(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }
}

/// Property source backed by a map of short keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapPropertySource {
    name: String,
    properties: HashMap<String, String>,
}

impl MapPropertySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), properties: HashMap::new() }
    }

    /// Store an entry; a later entry with the same key replaces the earlier one.
    pub fn insert(&mut self, entry: ConfigEntry) -> Option<String> {
        self.properties.insert(entry.key, entry.value)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }
}

impl FromIterator<ConfigEntry> for MapPropertySource {
    fn from_iter<I: IntoIterator<Item = ConfigEntry>>(iter: I) -> Self {
        let mut source = MapPropertySource::default();
        for entry in iter {
            source.insert(entry);
        }
        source
    }
}
