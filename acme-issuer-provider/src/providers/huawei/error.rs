//! Huawei Cloud error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::HuaweiProvider;

/// Huawei Cloud error code mapping.
/// Reference: <https://support.huaweicloud.com/api-dns/ErrorCode.html>
impl ProviderErrorMapper for HuaweiProvider {
    fn provider_name(&self) -> &'static str {
        "huawei"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code.as_deref() {
            // APIGW.0301: token invalid or expired
            // APIGW.0304: token missing
            // DNS.0003: authentication failed
            Some("APIGW.0301" | "APIGW.0304" | "DNS.0003") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            _ => self.api_error(raw),
        }
    }
}
