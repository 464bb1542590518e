//! # Parameter Retrieval
//!
//! Reads every parameter under a path prefix from a hierarchical parameter
//! store. [`fetch_all`] hides pagination and turns full parameter names into
//! short keys.

pub mod fetcher;
pub mod source;
pub mod ssm;

pub use fetcher::{fetch_all, short_key, ConfigEntry};
pub use source::{GetParametersByPathRequest, Parameter, ParameterPage, ParameterSource};
pub use ssm::SsmParameterSource;
