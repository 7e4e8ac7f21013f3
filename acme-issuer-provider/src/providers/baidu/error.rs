//! Baidu Cloud error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::BaiduProvider;

/// BCE common error code mapping.
/// Reference: <https://cloud.baidu.com/doc/Reference/s/Ajwvz5fk1>
impl ProviderErrorMapper for BaiduProvider {
    fn provider_name(&self) -> &'static str {
        "baidu"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code.as_deref() {
            Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }
            _ => self.api_error(raw),
        }
    }
}
