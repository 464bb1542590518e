//! # paramstore-loader
//!
//! Startup configuration loader for services that keep their settings in AWS
//! Systems Manager Parameter Store and their database credentials in AWS
//! Secrets Manager.
//!
//! ## Flow
//!
//! ```text
//! Parameter Store ──fetch_all──► short-key map ──► PropertySource
//!                                     │
//!                           key ends with "_secret"
//!                                     ▼
//! Secrets Manager ──SecretResolver──► extract ──► DatabaseSettings
//!                                                   └──► SystemProperties (DB_*)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use paramstore_loader::{AwsPropertySource, LoaderSettings, PropertySource, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = LoaderSettings::new("/myapp/prod/", "prod", "us-east-1");
//!     let mut source = AwsPropertySource::connect(settings).await?;
//!     println!("{:?}", source.get_property("db_url"));
//!     println!("{:?}", source.database().host);
//!     source.close().await;
//!     Ok(())
//! }
//! ```

pub mod aws;
pub mod cli;
pub mod config;
pub mod errors;
pub mod loader;
pub mod observability;
pub mod parameters;
pub mod properties;
pub mod secrets;

pub use config::{LoaderSettings, ObservabilityConfig};
pub use errors::{LoaderError, Result};
pub use loader::{AwsPropertySource, LoadedProperties, LoaderState, PropertyLoader};
pub use parameters::{ConfigEntry, ParameterSource};
pub use properties::{MapPropertySource, PropertySource, SystemProperties};
pub use secrets::{DatabaseField, DatabaseSettings, SecretSource, SecretString};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
