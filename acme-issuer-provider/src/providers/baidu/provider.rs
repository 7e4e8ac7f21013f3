//! `DnsProvider` implementation for Baidu Cloud DNS

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{split_zone, zone_relative_owner, TXT_TTL};
use crate::traits::{DnsProvider, ProviderErrorMapper, RawApiError};
use crate::types::{RecordHandle, TxtRecord};

use super::{BaiduProvider, BAIDU_DNS_BASE, BAIDU_DNS_HOST};

impl BaiduProvider {
    /// Execute a signed BCE request.
    async fn call(
        &self,
        method: Method,
        path: &str,
        query: &BTreeMap<String, String>,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        headers.insert("host".to_string(), BAIDU_DNS_HOST.to_string());
        headers.insert("x-bce-date".to_string(), timestamp.clone());

        let authorization = self.sign(method.as_str(), path, query, &headers, &timestamp);
        let method_name = method.to_string();

        let mut request = self
            .client
            .request(method, format!("{BAIDU_DNS_BASE}{path}"))
            .header("x-bce-date", &timestamp)
            .header("Authorization", authorization);
        if !query.is_empty() {
            let pairs: Vec<(&String, &String)> = query.iter().collect();
            request = request.query(&pairs);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            &method_name,
            path,
            self.max_retries,
        )
        .await?;

        if status >= 400 {
            let raw = serde_json::from_str::<serde_json::Value>(&response_text)
                .ok()
                .and_then(|v| {
                    let code = v.get("code").and_then(|c| c.as_str()).map(ToString::to_string);
                    let message = v
                        .get("message")
                        .and_then(|m| m.as_str())
                        .map(ToString::to_string);
                    message.map(|m| RawApiError { code, message: m })
                })
                .unwrap_or_else(|| RawApiError::new(format!("HTTP {status}: {response_text}")));
            log::error!("[baidu] API error: {}", raw.message);
            return Err(self.map_error(raw));
        }

        if response_text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        HttpUtils::parse_json(&response_text, self.provider_name())
    }

    async fn list_raw(&self, zone: &str) -> Result<Vec<serde_json::Value>> {
        let query: BTreeMap<String, String> =
            [("type".to_string(), "TXT".to_string())].into();
        let response = self
            .call(
                Method::GET,
                &format!("/v1/domain/{zone}/record"),
                &query,
                None,
            )
            .await?;
        Ok(response
            .get("records")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl DnsProvider for BaiduProvider {
    fn id(&self) -> &'static str {
        "baidu"
    }

    async fn add_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        value: &str,
    ) -> Result<RecordHandle> {
        let zone = split_zone(domain);
        let owner = zone_relative_owner(record_name, &zone);
        log::info!("[baidu] Creating TXT record {owner} in zone {zone}");

        let body = serde_json::json!({
            "rr": owner,
            "type": "TXT",
            "value": value,
            "ttl": TXT_TTL,
        });

        // The create response carries no record id; deletion later matches on
        // owner name + value
        self.call(
            Method::POST,
            &format!("/v1/domain/{zone}/record"),
            &BTreeMap::new(),
            Some(&body),
        )
        .await?;

        Ok(RecordHandle {
            id: None,
            name: record_name.to_string(),
            value: value.to_string(),
        })
    }

    async fn remove_txt_record(&self, domain: &str, handle: &RecordHandle) -> Result<()> {
        let zone = split_zone(domain);
        let owner = zone_relative_owner(&handle.name, &zone);

        let records = self.list_raw(&zone).await?;
        let found = records.iter().find(|r| {
            r.get("rr").and_then(|v| v.as_str()) == Some(owner.as_str())
                && r.get("value").and_then(|v| v.as_str()) == Some(handle.value.as_str())
        });

        let Some(id) = found.and_then(|r| r.get("id")).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }) else {
            log::warn!("[baidu] No matching TXT record to remove, skipping");
            return Ok(());
        };

        log::info!("[baidu] Removing TXT record {id} in zone {zone}");
        self.call(
            Method::DELETE,
            &format!("/v1/domain/{zone}/record/{id}"),
            &BTreeMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    async fn list_txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let zone = split_zone(domain);
        let records = self.list_raw(&zone).await?;

        Ok(records
            .iter()
            .map(|r| TxtRecord {
                name: r
                    .get("rr")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                value: r
                    .get("value")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                ttl: r
                    .get("ttl")
                    .and_then(serde_json::Value::as_u64)
                    .map(|t| u32::try_from(t).unwrap_or(u32::MAX)),
            })
            .collect())
    }
}
