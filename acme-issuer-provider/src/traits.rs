use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{RecordHandle, TxtRecord};

/// Raw API error (internal use).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Backend error code (format differs per provider).
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Error mapping trait (internal use).
///
/// Each provider implements this to map its backend's raw error payload to
/// the unified [`ProviderError`]. Auth failures become `InvalidCredentials`;
/// everything else the backend rejected becomes `ApiError` with the backend's
/// own code and message preserved.
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in error and log messages.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type.
    fn map_error(&self, raw: RawApiError) -> ProviderError;

    /// Shortcut: response parse failure.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: non-auth backend rejection (fallback).
    fn api_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::ApiError {
            provider: self.provider_name().to_string(),
            code: raw.code,
            message: raw.message,
        }
    }
}

/// DNS provider abstraction for ACME DNS-01 TXT record management.
///
/// `domain` is always the certificate domain (possibly with subdomains, e.g.
/// `www.example.com`); implementations derive the registrable zone themselves
/// and reduce `record_name` (the full `_acme-challenge.<domain>` form) to the
/// zone-relative owner name the backend expects.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Create a TXT record and return a handle that can later delete it.
    async fn add_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        value: &str,
    ) -> Result<RecordHandle>;

    /// Delete a TXT record previously created by
    /// [`add_txt_record`](Self::add_txt_record).
    async fn remove_txt_record(&self, domain: &str, handle: &RecordHandle) -> Result<()>;

    /// List the TXT records currently visible in the domain's zone.
    ///
    /// Record names in the result are zone-relative (`"@"` for the apex).
    async fn list_txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>>;
}
