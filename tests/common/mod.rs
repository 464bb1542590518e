//! In-memory backends shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use paramstore_loader::parameters::{GetParametersByPathRequest, Parameter, ParameterPage};
use paramstore_loader::secrets::{self, SecretsError};
use paramstore_loader::{
    LoaderError, LoaderSettings, ParameterSource, PropertyLoader, SecretSource, SecretString,
    SystemProperties,
};

pub const PREFIX: &str = "/myapp/prod/";

pub const FULL_PAYLOAD: &str = r#"{
    "username": "admin",
    "password": "s3cr3t",
    "engine": "mysql",
    "host": "db.internal",
    "port": 3306,
    "dbClusterIdentifier": "cluster-1"
}"#;

/// Parameter store serving fixed pages; tokens are page indexes.
#[derive(Default)]
pub struct FakeParameterStore {
    pages: Vec<Vec<Parameter>>,
    fail_with: Option<String>,
    pub requests: Mutex<Vec<GetParametersByPathRequest>>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeParameterStore {
    pub fn with_pages(pages: Vec<Vec<(&str, &str)>>) -> Self {
        let pages = pages
            .into_iter()
            .map(|page| page.into_iter().map(|(n, v)| Parameter::new(n, v)).collect())
            .collect();
        Self { pages, ..Default::default() }
    }

    pub fn single(parameters: Vec<(&str, &str)>) -> Self {
        Self::with_pages(vec![parameters])
    }

    pub fn failing(code: &str) -> Self {
        Self { fail_with: Some(code.to_string()), ..Default::default() }
    }
}

#[async_trait]
impl ParameterSource for FakeParameterStore {
    async fn get_parameters_by_path(
        &self,
        request: GetParametersByPathRequest,
    ) -> paramstore_loader::Result<ParameterPage> {
        if let Some(code) = &self.fail_with {
            return Err(LoaderError::backend("ssm", code.clone(), "fake failure", 400));
        }

        let index: usize = request.next_token.as_deref().map_or(0, |t| t.parse().unwrap());
        self.requests.lock().unwrap().push(request);

        let parameters = self.pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());
        Ok(ParameterPage { parameters, next_token })
    }

    async fn close(&self) -> paramstore_loader::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake-ssm"
    }
}

/// Secret store keyed by secret id.
#[derive(Default)]
pub struct FakeSecretStore {
    secrets: HashMap<String, Option<String>>,
    denied: Vec<String>,
    pub lookups: Mutex<Vec<String>>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeSecretStore {
    pub fn with_secret(mut self, id: &str, payload: &str) -> Self {
        self.secrets.insert(id.to_string(), Some(payload.to_string()));
        self
    }

    /// Secret that exists but carries no string value.
    pub fn with_empty_secret(mut self, id: &str) -> Self {
        self.secrets.insert(id.to_string(), None);
        self
    }

    pub fn with_denied(mut self, id: &str) -> Self {
        self.denied.push(id.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretSource for FakeSecretStore {
    async fn get_secret_value(&self, secret_id: &str) -> secrets::Result<Option<SecretString>> {
        self.lookups.lock().unwrap().push(secret_id.to_string());

        if self.denied.iter().any(|d| d == secret_id) {
            return Err(SecretsError::authentication_failed("denied"));
        }
        match self.secrets.get(secret_id) {
            Some(value) => Ok(value.clone().map(SecretString::new)),
            None => Err(SecretsError::not_found(secret_id)),
        }
    }

    async fn close(&self) -> secrets::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake-secrets"
    }
}

pub fn settings() -> LoaderSettings {
    LoaderSettings::new(PREFIX, "prod", "us-east-1")
}

/// Loader publishing into a private namespace, returned alongside it.
pub fn loader(
    parameters: FakeParameterStore,
    secrets: FakeSecretStore,
) -> (PropertyLoader<FakeParameterStore, FakeSecretStore>, Arc<SystemProperties>) {
    let properties = Arc::new(SystemProperties::new());
    let loader = PropertyLoader::new(parameters, secrets, settings())
        .with_system_properties(Arc::clone(&properties));
    (loader, properties)
}
