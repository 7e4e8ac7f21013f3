//! Aliyun error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::AliyunProvider;

/// Aliyun RPC error code mapping.
/// Reference: <https://help.aliyun.com/zh/dns/api-error-codes>
impl ProviderErrorMapper for AliyunProvider {
    fn provider_name(&self) -> &'static str {
        "aliyun"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code.as_deref() {
            Some(
                "InvalidAccessKeyId.NotFound"
                | "InvalidAccessKeyId.Inactive"
                | "SignatureDoesNotMatch"
                | "SignatureNonceUsed"
                | "Forbidden.AccessKeyDisabled",
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
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

    fn provider() -> AliyunProvider {
        AliyunProvider::new(create_http_client(), String::new(), String::new())
    }

    #[test]
    fn bad_access_key_is_auth_error() {
        let err = provider().map_error(RawApiError::with_code(
            "InvalidAccessKeyId.NotFound",
            "Specified access key is not found.",
        ));
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
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
    fn domain_error_is_api_error() {
        let err = provider().map_error(RawApiError::with_code(
            "InvalidDomainName.NoExist",
            "domain does not exist",
        ));
        assert!(matches!(
            err,
            ProviderError::ApiError { code: Some(code), .. } if code == "InvalidDomainName.NoExist"
        ));
    }
}
