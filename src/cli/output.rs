//! Output formatting for the load report

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::loader::LoadedProperties;
use crate::properties::PropertySource;
use crate::secrets::{DatabaseField, DatabaseSettings};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What a load produced, as shown to the operator.
#[derive(Debug, Serialize)]
pub struct LoadReport<'a> {
    pub source: &'a str,
    /// Keys in order; values only when requested
    pub properties: BTreeMap<&'a str, Option<&'a str>>,
    pub database: &'a DatabaseSettings,
}

impl<'a> LoadReport<'a> {
    pub fn new(loaded: &'a LoadedProperties, show_values: bool) -> Self {
        let properties = loaded
            .property_names()
            .into_iter()
            .map(|name| (name, loaded.get_property(name).filter(|_| show_values)))
            .collect();
        Self { source: loaded.name(), properties, database: &loaded.database }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize to JSON")
            }
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Property source: {} ({} keys)", self.source, self.properties.len());
        for (key, value) in &self.properties {
            match value {
                Some(value) => {
                    let _ = writeln!(out, "  {} = {}", key, value);
                }
                None => {
                    let _ = writeln!(out, "  {}", key);
                }
            }
        }

        if self.database.is_empty() {
            out.push_str("No database settings resolved\n");
            return out;
        }

        out.push_str("Database settings:\n");
        for field in DatabaseField::ALL {
            let value = match (field, self.database.get(field)) {
                (_, None) => "<missing>",
                (DatabaseField::Password, Some(_)) => "[REDACTED]",
                (_, Some(value)) => value,
            };
            let _ = writeln!(out, "  {} = {}", field.property_key(), value);
        }
        out
    }
}
