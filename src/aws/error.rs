//! Mapping from SDK errors to [`LoaderError`].

use aws_sdk_ssm::config::http::HttpResponse;
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::errors::LoaderError;

/// Convert a failed SDK call.
///
/// Service error responses become [`LoaderError::Backend`] with the AWS error
/// code and HTTP status; everything else is a transport failure.
pub fn sdk_error<E>(service: &str, operation: &str, error: SdkError<E, HttpResponse>) -> LoaderError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match error {
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            let err = context.err();
            LoaderError::backend(
                service,
                err.code().unwrap_or("Unknown"),
                err.message().unwrap_or_default(),
                status,
            )
        }
        other => {
            let message =
                format!("{} {} failed: {}", service, operation, DisplayErrorContext(&other));
            LoaderError::transport_with_source(message, Box::new(other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::operation::get_parameters_by_path::GetParametersByPathError;

    #[test]
    fn test_timeout_is_transport() {
        let err: SdkError<GetParametersByPathError, HttpResponse> =
            SdkError::timeout_error("connect timed out");
        let mapped = sdk_error("ssm", "GetParametersByPath", err);
        assert!(matches!(mapped, LoaderError::Transport { .. }));
        assert!(mapped.to_string().contains("ssm GetParametersByPath failed"));
    }
}
