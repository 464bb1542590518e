//! Parameter store capability and request types.

use async_trait::async_trait;

use crate::errors::Result;

/// One page request for parameters under a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetParametersByPathRequest {
    pub path: String,
    pub recursive: bool,
    pub with_decryption: bool,
    pub next_token: Option<String>,
}

impl GetParametersByPathRequest {
    /// Recursive, decrypted request for the first page under `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), recursive: true, with_decryption: true, next_token: None }
    }

    pub fn with_next_token(mut self, token: Option<String>) -> Self {
        self.next_token = token;
        self
    }
}

/// A raw parameter as returned by the store (full name, plain value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// One page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub parameters: Vec<Parameter>,
    pub next_token: Option<String>,
}

impl ParameterPage {
    /// Continuation token, treating an empty token as none.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Read access to a hierarchical parameter store.
///
/// Implemented by [`SsmParameterSource`](super::SsmParameterSource); tests
/// use in-memory fakes.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Fetch one page of parameters.
    async fn get_parameters_by_path(
        &self,
        request: GetParametersByPathRequest,
    ) -> Result<ParameterPage>;

    /// Release the underlying client handle.
    async fn close(&self) -> Result<()> {
        Ok(())
    }

    /// Name of this source for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_is_recursive_and_decrypted() {
        let first = GetParametersByPathRequest::new("/app/");
        assert_eq!(first.path, "/app/");
        assert!(first.recursive);
        assert!(first.with_decryption);
        assert_eq!(first.next_token, None);

        let next = first.with_next_token(Some("abc".to_string()));
        assert_eq!(next.next_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_token_ends_pagination() {
        let page = ParameterPage {
            parameters: vec![Parameter::new("/app/db_url", "postgres://db")],
            next_token: Some(String::new()),
        };
        assert_eq!(page.continuation(), None);

        let page = ParameterPage { next_token: Some("t".to_string()), ..page };
        assert_eq!(page.continuation(), Some("t"));
    }

    #[test]
    fn test_empty_page() {
        let page = ParameterPage::default();
        assert!(page.parameters.is_empty());
        assert!(page.continuation().is_none());
    }
}
