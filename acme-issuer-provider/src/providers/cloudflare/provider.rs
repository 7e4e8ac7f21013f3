//! `DnsProvider` implementation for Cloudflare

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::{split_zone, zone_relative_owner, TXT_TTL};
use crate::traits::{DnsProvider, ProviderErrorMapper, RawApiError};
use crate::types::{RecordHandle, TxtRecord};

use super::{CfDnsRecord, CfResponse, CloudflareProvider, CF_API_BASE, MAX_PAGE_SIZE_RECORDS};

impl CloudflareProvider {
    /// Unwrap the v4 envelope, mapping `success: false` through the error
    /// mapper with the first error entry.
    fn unwrap_envelope<T>(&self, envelope: CfResponse<T>) -> Result<T> {
        if !envelope.success {
            let raw = envelope
                .errors
                .as_ref()
                .and_then(|errors| errors.first())
                .map_or_else(
                    || RawApiError::new("Unknown error"),
                    |e| RawApiError::with_code(e.code.to_string(), e.message.clone()),
                );
            log::error!("[cloudflare] API error: {}", raw.message);
            return Err(self.map_error(raw));
        }
        envelope
            .result
            .ok_or_else(|| self.parse_error("Missing result field in response"))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self
            .client
            .get(format!("{CF_API_BASE}{path}"))
            .header("Authorization", format!("Bearer {}", self.api_token));

        let (_status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "GET",
            path,
            self.max_retries,
        )
        .await?;

        let envelope: CfResponse<T> = HttpUtils::parse_json(&response_text, self.provider_name())?;
        self.unwrap_envelope(envelope)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T> {
        let request = self
            .client
            .post(format!("{CF_API_BASE}{path}"))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(body);

        let (_status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "POST",
            path,
            self.max_retries,
        )
        .await?;

        let envelope: CfResponse<T> = HttpUtils::parse_json(&response_text, self.provider_name())?;
        self.unwrap_envelope(envelope)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let request = self
            .client
            .delete(format!("{CF_API_BASE}{path}"))
            .header("Authorization", format!("Bearer {}", self.api_token));

        let (_status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "DELETE",
            path,
            self.max_retries,
        )
        .await?;

        let envelope: CfResponse<serde_json::Value> =
            HttpUtils::parse_json(&response_text, self.provider_name())?;
        self.unwrap_envelope(envelope).map(|_| ())
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn add_txt_record(
        &self,
        _domain: &str,
        record_name: &str,
        value: &str,
    ) -> Result<RecordHandle> {
        log::info!("[cloudflare] Creating TXT record {record_name}");

        let body = json!({
            "type": "TXT",
            "name": record_name,
            "content": value,
            "ttl": TXT_TTL,
        });

        let record: CfDnsRecord = self
            .post(&format!("/zones/{}/dns_records", self.zone_id), &body)
            .await?;

        Ok(RecordHandle {
            id: Some(record.id),
            name: record_name.to_string(),
            value: value.to_string(),
        })
    }

    async fn remove_txt_record(&self, _domain: &str, handle: &RecordHandle) -> Result<()> {
        let record_id = handle.id.clone().ok_or_else(|| ProviderError::ApiError {
            provider: self.provider_name().to_string(),
            code: None,
            message: "Record handle has no id to delete by".to_string(),
        })?;
        log::info!("[cloudflare] Removing TXT record {record_id}");

        self.delete(&format!(
            "/zones/{}/dns_records/{record_id}",
            self.zone_id
        ))
        .await
    }

    async fn list_txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let zone = split_zone(domain);

        let records: Vec<CfDnsRecord> = self
            .get(&format!(
                "/zones/{}/dns_records?type=TXT&per_page={MAX_PAGE_SIZE_RECORDS}",
                self.zone_id
            ))
            .await?;

        Ok(records
            .into_iter()
            .filter(|r| r.record_type == "TXT")
            .map(|r| TxtRecord {
                name: zone_relative_owner(&r.name, &zone),
                value: r.content,
                ttl: r.ttl,
            })
            .collect())
    }
}
