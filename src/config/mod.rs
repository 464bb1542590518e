//! # Configuration Management
//!
//! Settings for the property loader and its logging. Values come from an
//! optional config file, `PARAMSTORE_*` environment variables and command
//! line overrides.

pub mod settings;

pub use settings::{LoaderSettings, ObservabilityConfig, SettingsOverrides, ENV_PREFIX};
