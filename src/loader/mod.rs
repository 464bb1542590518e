//! # Property Loader
//!
//! Orchestrates one startup load: fetch every parameter under the prefix,
//! resolve `_secret` references, publish the results. [`PropertyLoader`]
//! works against any backend pair; [`AwsPropertySource`] wires it to AWS.

pub mod aws;
pub mod property_loader;

pub use aws::{build_loader, AwsPropertyLoader, AwsPropertySource};
pub use property_loader::{LoadedProperties, LoaderState, PropertyLoader, PROPERTY_SOURCE_NAME};
