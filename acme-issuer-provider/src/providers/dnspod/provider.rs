//! `DnsProvider` implementation for `DNSPod`

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::{split_zone, zone_relative_owner, TXT_TTL};
use crate::traits::{DnsProvider, ProviderErrorMapper, RawApiError};
use crate::types::{RecordHandle, TxtRecord};

use super::{DnspodProvider, DNSPOD_API_BASE, DNSPOD_RECORD_LINE};

impl DnspodProvider {
    /// Execute a legacy API action (form-encoded POST, JSON response).
    ///
    /// Success is signalled in-band: `status.code == "1"`. Anything else is
    /// mapped through the error mapper with the status code and message.
    async fn call(&self, action: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        let mut form: Vec<(&str, String)> = vec![
            ("login_token", self.login_token()),
            ("format", "json".to_string()),
        ];
        form.extend_from_slice(params);

        let request = self
            .client
            .post(format!("{DNSPOD_API_BASE}/{action}"))
            .form(&form);

        let (_status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "POST",
            action,
            self.max_retries,
        )
        .await?;

        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;

        let code = value
            .pointer("/status/code")
            .and_then(|c| c.as_str())
            .ok_or_else(|| self.parse_error("Missing status.code in response"))?;

        if code != "1" {
            let message = value
                .pointer("/status/message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            log::error!("[dnspod] API error {code}: {message}");
            return Err(self.map_error(RawApiError::with_code(code, message)));
        }

        Ok(value)
    }
}

#[async_trait]
impl DnsProvider for DnspodProvider {
    fn id(&self) -> &'static str {
        "dnspod"
    }

    async fn add_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        value: &str,
    ) -> Result<RecordHandle> {
        let zone = split_zone(domain);
        let owner = zone_relative_owner(record_name, &zone);
        log::info!("[dnspod] Creating TXT record {owner} in zone {zone}");

        let response = self
            .call(
                "Record.Create",
                &[
                    ("domain", zone),
                    ("sub_domain", owner),
                    ("record_type", "TXT".to_string()),
                    ("record_line", DNSPOD_RECORD_LINE.to_string()),
                    ("value", value.to_string()),
                    ("ttl", TXT_TTL.to_string()),
                ],
            )
            .await?;

        // The legacy API returns the id as a JSON string
        let id = response
            .pointer("/record/id")
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .ok_or_else(|| self.parse_error("Missing record.id in create response"))?;

        Ok(RecordHandle {
            id: Some(id),
            name: record_name.to_string(),
            value: value.to_string(),
        })
    }

    async fn remove_txt_record(&self, domain: &str, handle: &RecordHandle) -> Result<()> {
        let zone = split_zone(domain);
        let record_id = handle.id.clone().ok_or_else(|| ProviderError::ApiError {
            provider: self.provider_name().to_string(),
            code: None,
            message: "Record handle has no id to delete by".to_string(),
        })?;
        log::info!("[dnspod] Removing TXT record {record_id} in zone {zone}");

        self.call(
            "Record.Remove",
            &[("domain", zone), ("record_id", record_id)],
        )
        .await?;
        Ok(())
    }

    async fn list_txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let zone = split_zone(domain);

        let response = self
            .call(
                "Record.List",
                &[("domain", zone), ("record_type", "TXT".to_string())],
            )
            .await?;

        let records = response
            .get("records")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(records
            .iter()
            .filter(|r| r.get("type").and_then(|t| t.as_str()) == Some("TXT"))
            .map(|r| TxtRecord {
                name: r
                    .get("name")
                    .and_then(|n| n.as_str())
                    .unwrap_or_default()
                    .to_string(),
                value: r
                    .get("value")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                // ttl comes back as a string
                ttl: r
                    .get("ttl")
                    .and_then(|t| t.as_str())
                    .and_then(|t| t.parse().ok()),
            })
            .collect())
    }
}
