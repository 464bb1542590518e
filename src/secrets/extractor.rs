//! Extraction of database connection fields from a secret payload.
//!
//! Database secrets are flat JSON objects in the shape the RDS rotation
//! templates produce:
//!
//! ```json
//! {
//!   "username": "app",
//!   "password": "...",
//!   "engine": "mysql",
//!   "host": "db.cluster-xyz.us-east-1.rds.amazonaws.com",
//!   "port": 3306,
//!   "dbClusterIdentifier": "db"
//! }
//! ```
//!
//! Each recognized field is optional. A missing or null field is logged and
//! skipped; only a payload that is not a JSON object fails the extraction.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, error, warn};

use super::error::{Result, SecretsError};
use super::types::SecretString;

/// A database connection field recognized in secret payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatabaseField {
    Username,
    Password,
    Engine,
    Host,
    Port,
    ClusterIdentifier,
}

impl DatabaseField {
    /// All recognized fields, in publication order.
    pub const ALL: [DatabaseField; 6] = [
        DatabaseField::Username,
        DatabaseField::Password,
        DatabaseField::Engine,
        DatabaseField::Host,
        DatabaseField::Port,
        DatabaseField::ClusterIdentifier,
    ];

    /// Key of this field inside the secret JSON.
    pub fn json_key(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Engine => "engine",
            Self::Host => "host",
            Self::Port => "port",
            Self::ClusterIdentifier => "dbClusterIdentifier",
        }
    }

    /// System property name this field is published under.
    pub fn property_key(&self) -> &'static str {
        match self {
            Self::Username => "DB_USERNAME",
            Self::Password => "DB_PASSWORD",
            Self::Engine => "DB_ENGINE",
            Self::Host => "DB_HOST",
            Self::Port => "DB_PORT",
            Self::ClusterIdentifier => "DB_CLUSTER_IDENTIFIER",
        }
    }
}

impl fmt::Display for DatabaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}

/// Database connection settings resolved from one or more secrets.
///
/// Every field is `None` unless a secret supplied it. The struct is built once
/// during the load and handed to whatever constructs the database client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseSettings {
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub engine: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub cluster_identifier: Option<String>,
}

impl DatabaseSettings {
    /// Raw value of a field. The password is exposed; do not log it.
    pub fn get(&self, field: DatabaseField) -> Option<&str> {
        match field {
            DatabaseField::Username => self.username.as_deref(),
            DatabaseField::Password => self.password.as_ref().map(|p| p.expose_secret()),
            DatabaseField::Engine => self.engine.as_deref(),
            DatabaseField::Host => self.host.as_deref(),
            DatabaseField::Port => self.port.as_deref(),
            DatabaseField::ClusterIdentifier => self.cluster_identifier.as_deref(),
        }
    }

    fn set(&mut self, field: DatabaseField, value: String) {
        match field {
            DatabaseField::Username => self.username = Some(value),
            DatabaseField::Password => self.password = Some(SecretString::new(value)),
            DatabaseField::Engine => self.engine = Some(value),
            DatabaseField::Host => self.host = Some(value),
            DatabaseField::Port => self.port = Some(value),
            DatabaseField::ClusterIdentifier => self.cluster_identifier = Some(value),
        }
    }

    /// Fields that carry a value.
    pub fn present_fields(&self) -> Vec<DatabaseField> {
        DatabaseField::ALL.into_iter().filter(|f| self.get(*f).is_some()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }

    /// `(property key, value)` pairs for every present field.
    pub fn properties(&self) -> Vec<(&'static str, &str)> {
        DatabaseField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f.property_key(), v)))
            .collect()
    }

    /// Overlay the present fields of `other` onto `self`.
    ///
    /// Fields absent from `other` keep their current value.
    pub fn merge(&mut self, other: DatabaseSettings) {
        for field in other.present_fields() {
            if let Some(value) = other.get(field) {
                self.set(field, value.to_string());
            }
        }
    }
}

/// Parse a secret payload and extract the recognized database fields.
///
/// # Errors
///
/// Returns [`SecretsError::SerializationError`] if the payload is not JSON and
/// [`SecretsError::InvalidValue`] if it is JSON but not an object.
pub fn extract(payload: &SecretString) -> Result<DatabaseSettings> {
    let value: Value = serde_json::from_str(payload.expose_secret())?;
    match value {
        Value::Object(object) => Ok(extract_fields(&object)),
        other => Err(SecretsError::invalid_value(format!(
            "secret payload must be a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn extract_fields(object: &Map<String, Value>) -> DatabaseSettings {
    let mut settings = DatabaseSettings::default();

    for field in DatabaseField::ALL {
        match object.get(field.json_key()) {
            None | Some(Value::Null) => {
                error!(field = %field, "Missing or null field in secret value");
            }
            Some(Value::String(s)) => settings.set(field, s.clone()),
            Some(value @ (Value::Number(_) | Value::Bool(_))) => {
                settings.set(field, value.to_string())
            }
            Some(other) => {
                warn!(field = %field, kind = json_kind(other), "Secret field is not a scalar, ignoring");
            }
        }
    }

    debug!(fields = ?settings.present_fields(), "Extracted database fields from secret");
    settings
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const FULL: &str = r#"{"username":"u","password":"p","engine":"mysql","host":"h","port":"3306","dbClusterIdentifier":"cid"}"#;

    #[test]
    fn test_extract_all_fields() {
        let settings = extract(&SecretString::new(FULL)).unwrap();

        assert_eq!(settings.username.as_deref(), Some("u"));
        assert_eq!(settings.password.as_ref().map(|p| p.expose_secret()), Some("p"));
        assert_eq!(settings.engine.as_deref(), Some("mysql"));
        assert_eq!(settings.host.as_deref(), Some("h"));
        assert_eq!(settings.port.as_deref(), Some("3306"));
        assert_eq!(settings.cluster_identifier.as_deref(), Some("cid"));
        assert_eq!(settings.present_fields().len(), 6);
    }

    #[traced_test]
    #[test]
    fn test_extract_missing_and_null_fields_are_skipped() {
        let payload = SecretString::new(r#"{"username":"u","password":"p","port":null}"#);
        let settings = extract(&payload).unwrap();

        assert_eq!(
            settings.present_fields(),
            vec![DatabaseField::Username, DatabaseField::Password]
        );
        assert!(settings.port.is_none());
        assert!(logs_contain("Missing or null field in secret value"));
    }

    #[test]
    fn test_extract_renders_numbers_and_booleans() {
        let payload = SecretString::new(r#"{"port":5432,"engine":true}"#);
        let settings = extract(&payload).unwrap();

        assert_eq!(settings.port.as_deref(), Some("5432"));
        assert_eq!(settings.engine.as_deref(), Some("true"));
    }

    #[test]
    fn test_extract_ignores_nested_values_and_unknown_keys() {
        let payload = SecretString::new(r#"{"host":{"primary":"a"},"region":"us-east-1","username":"u"}"#);
        let settings = extract(&payload).unwrap();

        assert!(settings.host.is_none());
        assert_eq!(settings.present_fields(), vec![DatabaseField::Username]);
    }

    #[test]
    fn test_extract_rejects_malformed_json() {
        let err = extract(&SecretString::new("username=u")).unwrap_err();
        assert!(matches!(err, SecretsError::SerializationError(_)));
    }

    #[test]
    fn test_extract_rejects_non_object() {
        let err = extract(&SecretString::new(r#"["u","p"]"#)).unwrap_err();
        assert!(matches!(err, SecretsError::InvalidValue { .. }));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_properties_use_fixed_keys() {
        let settings = extract(&SecretString::new(FULL)).unwrap();
        let properties = settings.properties();

        assert_eq!(
            properties,
            vec![
                ("DB_USERNAME", "u"),
                ("DB_PASSWORD", "p"),
                ("DB_ENGINE", "mysql"),
                ("DB_HOST", "h"),
                ("DB_PORT", "3306"),
                ("DB_CLUSTER_IDENTIFIER", "cid"),
            ]
        );
    }

    #[test]
    fn test_merge_overlays_present_fields_only() {
        let mut base = extract(&SecretString::new(FULL)).unwrap();
        let update = extract(&SecretString::new(r#"{"host":"replica"}"#)).unwrap();

        base.merge(update);

        assert_eq!(base.host.as_deref(), Some("replica"));
        assert_eq!(base.username.as_deref(), Some("u"));
        assert_eq!(base.present_fields().len(), 6);
    }

    #[test]
    fn test_settings_serialization_redacts_password() {
        let settings = extract(&SecretString::new(FULL)).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("\"p\""));
    }
}
