//! `DNSPod` error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::DnspodProvider;

/// Legacy API status codes.
/// Reference: <https://docs.dnspod.cn/api/common-response/>
impl ProviderErrorMapper for DnspodProvider {
    fn provider_name(&self) -> &'static str {
        "dnspod"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code.as_deref() {
            // -1: login failed
            // -8: login blocked (too many failures)
            // 85: remote login rejected
            Some("-1" | "-8" | "85") => ProviderError::InvalidCredentials {
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

    fn provider() -> DnspodProvider {
        DnspodProvider::new(create_http_client(), String::new(), String::new())
    }

    #[test]
    fn login_failure_is_auth_error() {
        let err = provider().map_error(RawApiError::with_code("-1", "login failed"));
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn remote_login_is_auth_error() {
        let err = provider().map_error(RawApiError::with_code("85", "remote login"));
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn other_codes_are_api_errors() {
        let err = provider().map_error(RawApiError::with_code("6", "invalid domain id"));
        assert!(matches!(
            err,
            ProviderError::ApiError { code: Some(code), .. } if code == "6"
        ));
    }

    #[test]
    fn missing_code_is_api_error() {
        let err = provider().map_error(RawApiError::new("unexpected"));
        assert!(matches!(err, ProviderError::ApiError { code: None, .. }));
    }
}
