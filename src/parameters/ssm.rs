//! AWS Systems Manager Parameter Store source.

use async_trait::async_trait;

use super::source::{GetParametersByPathRequest, Parameter, ParameterPage, ParameterSource};
use crate::aws::{sdk_error, ClientHandle};
use crate::errors::Result;

/// Parameter source backed by `GetParametersByPath`.
#[derive(Debug)]
pub struct SsmParameterSource {
    client: ClientHandle<aws_sdk_ssm::Client>,
}

impl SsmParameterSource {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client: ClientHandle::new("ssm", client) }
    }

    pub fn client(&self) -> &aws_sdk_ssm::Client {
        self.client.inner()
    }
}

#[async_trait]
impl ParameterSource for SsmParameterSource {
    async fn get_parameters_by_path(
        &self,
        request: GetParametersByPathRequest,
    ) -> Result<ParameterPage> {
        let output = self
            .client
            .get()?
            .get_parameters_by_path()
            .path(request.path)
            .recursive(request.recursive)
            .with_decryption(request.with_decryption)
            .set_next_token(request.next_token)
            .send()
            .await
            .map_err(|e| sdk_error("ssm", "GetParametersByPath", e))?;

        // Name and Value are always set by the service
        let parameters = output
            .parameters()
            .iter()
            .filter_map(|p| Some(Parameter::new(p.name()?, p.value()?)))
            .collect();

        Ok(ParameterPage { parameters, next_token: output.next_token().map(str::to_string) })
    }

    async fn close(&self) -> Result<()> {
        self.client.close()
    }

    fn name(&self) -> &'static str {
        "ssm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{ssm_client, test_sdk_config};
    use crate::config::LoaderSettings;
    use crate::errors::LoaderError;
    use crate::parameters::{fetch_all, ConfigEntry};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> SsmParameterSource {
        let settings = LoaderSettings {
            parameter_endpoint: Some(server.uri()),
            ..LoaderSettings::new("/app/", "prod", "us-east-1")
        };
        SsmParameterSource::new(ssm_client(&test_sdk_config(None), &settings).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_all_over_http_follows_next_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-amz-target", "AmazonSSM.GetParametersByPath"))
            .and(body_json(json!({"Path": "/app/", "Recursive": true, "WithDecryption": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Parameters": [
                    {"Name": "/app/db_url", "Type": "String", "Value": "jdbc:mysql://db", "Version": 1}
                ],
                "NextToken": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(body_json(json!({
                "Path": "/app/",
                "Recursive": true,
                "WithDecryption": true,
                "NextToken": "page-2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Parameters": [
                    {"Name": "/app/db_secret", "Type": "String", "Value": "prod/db", "Version": 4}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = fetch_all(&source(&server), "/app/").await.unwrap();
        assert_eq!(
            entries,
            vec![
                ConfigEntry::new("db_url", "jdbc:mysql://db"),
                ConfigEntry::new("db_secret", "prod/db"),
            ]
        );
    }

    #[tokio::test]
    async fn test_access_denied_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "AccessDeniedException",
                "message": "User is not authorized to perform: ssm:GetParametersByPath"
            })))
            .mount(&server)
            .await;

        let err = fetch_all(&source(&server), "/app/").await.unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Backend { ref code, status: 400, .. } if code == "AccessDeniedException"
        ));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_closed_source_rejects_calls() {
        let server = MockServer::start().await;
        let source = source(&server);

        source.close().await.unwrap();
        let err = fetch_all(&source, "/app/").await.unwrap_err();
        assert!(matches!(err, LoaderError::ClientClosed { .. }));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
