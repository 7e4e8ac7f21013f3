//! Route 53 error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::Route53Provider;

/// AWS common error code mapping.
/// Reference: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
impl ProviderErrorMapper for Route53Provider {
    fn provider_name(&self) -> &'static str {
        "route53"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code.as_deref() {
            Some(
                "SignatureDoesNotMatch"
                | "InvalidClientTokenId"
                | "MissingAuthenticationToken"
                | "AccessDenied"
                | "InvalidSignatureException",
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            Some("Throttling" | "PriorRequestNotComplete") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },
            _ => self.api_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::common::create_http_client;

    fn provider() -> Route53Provider {
        Route53Provider::new(
            create_http_client(),
            String::new(),
            String::new(),
            "us-east-1".into(),
            "Z123".into(),
        )
    }

    #[test]
    fn bad_signature_is_auth_error() {
        let err = provider().map_error(RawApiError::with_code(
            "SignatureDoesNotMatch",
            "signature mismatch",
        ));
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn throttling_is_rate_limited() {
        let err = provider().map_error(RawApiError::with_code("Throttling", "slow down"));
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    #[test]
    fn change_error_is_api_error() {
        let err = provider().map_error(RawApiError::with_code(
            "InvalidChangeBatch",
            "record set already exists",
        ));
        assert!(matches!(
            err,
            ProviderError::ApiError { code: Some(code), .. } if code == "InvalidChangeBatch"
        ));
    }
}
