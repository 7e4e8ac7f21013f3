//! `DnsProvider` implementation for Aliyun DNS

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{split_zone, zone_relative_owner, TXT_TTL};
use crate::traits::{DnsProvider, ProviderErrorMapper, RawApiError};
use crate::types::{RecordHandle, TxtRecord};

use super::{AliyunProvider, ALIYUN_DNS_BASE, ALIYUN_DNS_VERSION};

impl AliyunProvider {
    /// Execute an RPC action (signed GET, JSON response).
    ///
    /// Errors come back in-band as a `Code`/`Message` pair on an HTTP 4xx/5xx
    /// or even 200 response, so presence of `Code` decides failure.
    async fn call(
        &self,
        action: &str,
        extra: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        let mut params: BTreeMap<String, String> = BTreeMap::new();
        params.insert("Action".to_string(), action.to_string());
        params.insert("Version".to_string(), ALIYUN_DNS_VERSION.to_string());
        params.insert("Format".to_string(), "JSON".to_string());
        params.insert("AccessKeyId".to_string(), self.access_key_id.clone());
        params.insert("SignatureMethod".to_string(), "HMAC-SHA1".to_string());
        params.insert("SignatureVersion".to_string(), "1.0".to_string());
        params.insert(
            "SignatureNonce".to_string(),
            Uuid::new_v4().to_string(),
        );
        params.insert(
            "Timestamp".to_string(),
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        );
        for (k, v) in extra {
            params.insert((*k).to_string(), v.clone());
        }

        let signature = self.sign(&params);
        params.insert("Signature".to_string(), signature);

        let query: Vec<(String, String)> = params.into_iter().collect();
        let request = self.client.get(ALIYUN_DNS_BASE).query(&query);

        let (_status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "GET",
            &format!("Action: {action}"),
            self.max_retries,
        )
        .await?;

        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;

        if let Some(code) = value.get("Code").and_then(|c| c.as_str()) {
            let message = value
                .get("Message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            log::error!("[aliyun] API error {code}: {message}");
            return Err(self.map_error(RawApiError::with_code(code, message)));
        }

        Ok(value)
    }
}

#[async_trait]
impl DnsProvider for AliyunProvider {
    fn id(&self) -> &'static str {
        "aliyun"
    }

    async fn add_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        value: &str,
    ) -> Result<RecordHandle> {
        let zone = split_zone(domain);
        let owner = zone_relative_owner(record_name, &zone);
        log::info!("[aliyun] Creating TXT record {owner} in zone {zone}");

        let response = self
            .call(
                "AddDomainRecord",
                &[
                    ("DomainName", zone),
                    ("RR", owner),
                    ("Type", "TXT".to_string()),
                    ("Value", value.to_string()),
                    ("TTL", TXT_TTL.to_string()),
                ],
            )
            .await?;

        let id = response
            .get("RecordId")
            .and_then(|v| v.as_str())
            .map(ToString::to_string)
            .ok_or_else(|| self.parse_error("Missing RecordId in create response"))?;

        Ok(RecordHandle {
            id: Some(id),
            name: record_name.to_string(),
            value: value.to_string(),
        })
    }

    async fn remove_txt_record(&self, domain: &str, handle: &RecordHandle) -> Result<()> {
        let record_id = match &handle.id {
            Some(id) => id.clone(),
            // Fall back to locating the record by owner name + value
            None => {
                let zone = split_zone(domain);
                let owner = zone_relative_owner(&handle.name, &zone);
                let response = self
                    .call(
                        "DescribeDomainRecords",
                        &[("DomainName", zone), ("Type", "TXT".to_string())],
                    )
                    .await?;
                let records = response
                    .pointer("/DomainRecords/Record")
                    .and_then(|r| r.as_array())
                    .cloned()
                    .unwrap_or_default();
                let found = records.iter().find(|r| {
                    r.get("RR").and_then(|v| v.as_str()) == Some(owner.as_str())
                        && r.get("Value").and_then(|v| v.as_str()) == Some(handle.value.as_str())
                });
                match found.and_then(|r| r.get("RecordId")).and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        log::warn!("[aliyun] No matching TXT record to remove, skipping");
                        return Ok(());
                    }
                }
            }
        };

        log::info!("[aliyun] Removing TXT record {record_id}");
        self.call("DeleteDomainRecord", &[("RecordId", record_id)])
            .await?;
        Ok(())
    }

    async fn list_txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let zone = split_zone(domain);

        let response = self
            .call(
                "DescribeDomainRecords",
                &[("DomainName", zone), ("Type", "TXT".to_string())],
            )
            .await?;

        let records = response
            .pointer("/DomainRecords/Record")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(records
            .iter()
            .map(|r| TxtRecord {
                name: r
                    .get("RR")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                value: r
                    .get("Value")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                ttl: r.get("TTL").and_then(serde_json::Value::as_u64).map(|t| {
                    u32::try_from(t).unwrap_or(u32::MAX)
                }),
            })
            .collect())
    }
}
