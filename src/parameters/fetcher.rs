//! Paginated retrieval of every parameter under a path prefix.

use tracing::{debug, info, Instrument};

use super::source::{GetParametersByPathRequest, ParameterSource};
use crate::errors::{LoaderError, Result};

/// A parameter keyed by its short key (full name minus the query prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Remove the first occurrence of `prefix` from `name`.
///
/// Names returned by a path query always start with the prefix; other names
/// lose the first place the prefix appears, or are returned unchanged.
pub fn short_key(name: &str, prefix: &str) -> String {
    match name.strip_prefix(prefix) {
        Some(rest) => rest.to_string(),
        None => name.replacen(prefix, "", 1),
    }
}

/// Fetch every parameter under `path_prefix`, following continuation tokens
/// until the store stops returning one.
///
/// Entries come back in store order with the prefix stripped. Duplicates are
/// not removed. Any backend error aborts the fetch.
pub async fn fetch_all<P>(source: &P, path_prefix: &str) -> Result<Vec<ConfigEntry>>
where
    P: ParameterSource + ?Sized,
{
    if path_prefix.is_empty() {
        return Err(LoaderError::validation_field(
            "Parameter path prefix cannot be empty",
            "parameter_prefix",
        ));
    }

    let mut entries = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let request = GetParametersByPathRequest::new(path_prefix).with_next_token(next_token.take());
        let span = crate::backend_span!("get_parameters_by_path", source.name(), page = pages);
        let page = source.get_parameters_by_path(request).instrument(span).await?;
        pages += 1;

        debug!(page = pages, count = page.parameters.len(), "Fetched parameter page");

        next_token = page.continuation().map(str::to_string);
        entries.extend(
            page.parameters.into_iter().map(|p| ConfigEntry::new(short_key(&p.name, path_prefix), p.value)),
        );

        if next_token.is_none() {
            break;
        }
    }

    info!(prefix = %path_prefix, pages, count = entries.len(), "Fetched parameters from store");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::source::{Parameter, ParameterPage};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::Mutex;

    /// Serves pre-built pages; page N is returned for token "N".
    struct PagedSource {
        pages: Vec<Vec<Parameter>>,
        requests: Mutex<Vec<GetParametersByPathRequest>>,
    }

    impl PagedSource {
        fn new(pages: Vec<Vec<Parameter>>) -> Self {
            Self { pages, requests: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl ParameterSource for PagedSource {
        async fn get_parameters_by_path(
            &self,
            request: GetParametersByPathRequest,
        ) -> Result<ParameterPage> {
            let index: usize = request.next_token.as_deref().map_or(0, |t| t.parse().unwrap());
            self.requests.lock().unwrap().push(request);
            let next_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());
            Ok(ParameterPage { parameters: self.pages[index].clone(), next_token })
        }

        fn name(&self) -> &'static str {
            "paged"
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ParameterSource for FailingSource {
        async fn get_parameters_by_path(
            &self,
            _request: GetParametersByPathRequest,
        ) -> Result<ParameterPage> {
            Err(LoaderError::backend("ssm", "AccessDeniedException", "denied", 400))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_short_key_strips_leading_prefix() {
        assert_eq!(short_key("/app/prod/db_url", "/app/prod/"), "db_url");
        assert_eq!(short_key("/app/prod/nested/key", "/app/prod"), "/nested/key");
    }

    #[test]
    fn test_short_key_removes_first_occurrence_only() {
        assert_eq!(short_key("/x/app/app/key", "app/"), "/x/app/key");
        assert_eq!(short_key("/other/key", "/app/"), "/other/key");
    }

    #[tokio::test]
    async fn test_fetch_all_single_page() {
        let source = PagedSource::new(vec![vec![
            Parameter::new("/app/a", "1"),
            Parameter::new("/app/b", "2"),
        ]]);

        let entries = fetch_all(&source, "/app/").await.unwrap();
        assert_eq!(entries, vec![ConfigEntry::new("a", "1"), ConfigEntry::new("b", "2")]);

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].recursive);
        assert!(requests[0].with_decryption);
        assert_eq!(requests[0].next_token, None);
    }

    #[tokio::test]
    async fn test_fetch_all_follows_tokens_until_exhausted() {
        let source = PagedSource::new(vec![
            vec![Parameter::new("/app/a", "1")],
            vec![],
            vec![Parameter::new("/app/b", "2"), Parameter::new("/app/a", "3")],
        ]);

        let entries = fetch_all(&source, "/app/").await.unwrap();
        assert_eq!(
            entries,
            vec![ConfigEntry::new("a", "1"), ConfigEntry::new("b", "2"), ConfigEntry::new("a", "3")]
        );

        let tokens: Vec<Option<String>> =
            source.requests.lock().unwrap().iter().map(|r| r.next_token.clone()).collect();
        assert_eq!(tokens, vec![None, Some("1".to_string()), Some("2".to_string())]);
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_empty_prefix() {
        let source = PagedSource::new(vec![vec![]]);
        let err = fetch_all(&source, "").await.unwrap_err();
        assert!(matches!(err, LoaderError::Validation { .. }));
        assert!(source.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_backend_errors() {
        let err = fetch_all(&FailingSource, "/app/").await.unwrap_err();
        assert_eq!(err.backend_code(), Some("AccessDeniedException"));
    }

    proptest! {
        #[test]
        fn prop_fetch_all_returns_union_of_pages(
            pages in prop::collection::vec(
                prop::collection::vec(("[a-z_]{1,12}", "[ -~]{0,16}"), 0..5),
                1..6,
            )
        ) {
            let parameters: Vec<Vec<Parameter>> = pages
                .iter()
                .map(|page| page.iter().map(|(k, v)| Parameter::new(format!("/svc/{}", k), v.clone())).collect())
                .collect();
            let expected: Vec<ConfigEntry> = pages
                .iter()
                .flatten()
                .map(|(k, v)| ConfigEntry::new(k.clone(), v.clone()))
                .collect();

            let source = PagedSource::new(parameters);
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let entries = runtime.block_on(fetch_all(&source, "/svc/")).unwrap();

            prop_assert_eq!(entries, expected);
            prop_assert_eq!(source.requests.lock().unwrap().len(), pages.len());
        }

        #[test]
        fn prop_short_key_restores_name(prefix in "/[a-z]{1,8}/", key in "[a-z_/]{0,16}") {
            let name = format!("{}{}", prefix, key);
            prop_assert_eq!(short_key(&name, &prefix), key);
        }
    }
}
