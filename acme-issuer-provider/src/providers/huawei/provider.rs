//! `DnsProvider` implementation for Huawei Cloud DNS

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::{split_zone, zone_relative_owner, TXT_TTL};
use crate::traits::{DnsProvider, ProviderErrorMapper, RawApiError};
use crate::types::{RecordHandle, TxtRecord};

use super::{HuaweiProvider, HUAWEI_IAM_TOKEN_URL};

impl HuaweiProvider {
    /// Obtain a project-scoped session token from the IAM endpoint.
    ///
    /// The token comes back in the `X-Subject-Token` response header, not the
    /// body, so this bypasses the shared body-oriented request flow.
    async fn fetch_token(&self) -> Result<String> {
        let body = json!({
            "auth": {
                "identity": {
                    "methods": ["aksk"],
                    "aksk": {
                        "access": self.access_key_id,
                        "secret": self.secret_access_key,
                    },
                },
                "scope": {
                    "project": {
                        "id": self.project_id,
                    },
                },
            },
        });

        log::debug!("[huawei] POST {HUAWEI_IAM_TOKEN_URL}");
        let response = self
            .client
            .post(HUAWEI_IAM_TOKEN_URL)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        provider: self.provider_name().to_string(),
                        detail: e.to_string(),
                    }
                } else {
                    ProviderError::NetworkError {
                        provider: self.provider_name().to_string(),
                        detail: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[huawei] IAM rejected credentials (HTTP {status})");
            return Err(ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(body),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.map_error(RawApiError::new(format!("IAM HTTP {status}: {body}"))));
        }

        response
            .headers()
            .get("x-subject-token")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .ok_or_else(|| self.parse_error("Missing X-Subject-Token header in IAM response"))
    }

    /// Execute a DNS API request with a freshly fetched token.
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let token = self.fetch_token().await?;
        let url = format!("{}{path}", self.dns_base());
        let method_name = method.to_string();

        let mut request = self
            .client
            .request(method, &url)
            .header("X-Auth-Token", token);
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
                    message.map(|m| RawApiError {
                        code,
                        message: m,
                    })
                })
                .unwrap_or_else(|| RawApiError::new(format!("HTTP {status}: {response_text}")));
            log::error!("[huawei] API error: {}", raw.message);
            return Err(if status == 401 || status == 403 {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            } else {
                self.map_error(raw)
            });
        }

        if response_text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        HttpUtils::parse_json(&response_text, self.provider_name())
    }
}

#[async_trait]
impl DnsProvider for HuaweiProvider {
    fn id(&self) -> &'static str {
        "huawei"
    }

    async fn add_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        value: &str,
    ) -> Result<RecordHandle> {
        let zone = split_zone(domain);
        let owner = zone_relative_owner(record_name, &zone);
        let name = if owner == "@" { zone.clone() } else { owner };
        log::info!("[huawei] Creating TXT record {name} in zone {zone}");

        let body = json!({
            "name": name,
            "type": "TXT",
            "records": [value],
            "ttl": TXT_TTL,
        });

        let response = self
            .call(
                Method::POST,
                &format!("/v2/zones/{zone}/recordsets"),
                Some(&body),
            )
            .await?;

        let id = response
            .get("id")
            .and_then(|v| v.as_str())
            .map(ToString::to_string);

        Ok(RecordHandle {
            id,
            name: record_name.to_string(),
            value: value.to_string(),
        })
    }

    async fn remove_txt_record(&self, domain: &str, handle: &RecordHandle) -> Result<()> {
        let zone = split_zone(domain);

        let record_id = match &handle.id {
            Some(id) => id.clone(),
            None => {
                let owner = zone_relative_owner(&handle.name, &zone);
                let response = self
                    .call(
                        Method::GET,
                        &format!("/v2/zones/{zone}/recordsets?type=TXT"),
                        None,
                    )
                    .await?;
                let recordsets = response
                    .get("recordsets")
                    .and_then(|r| r.as_array())
                    .cloned()
                    .unwrap_or_default();
                let found = recordsets.iter().find(|r| {
                    let name_matches = r
                        .get("name")
                        .and_then(|n| n.as_str())
                        .is_some_and(|n| zone_relative_owner(n, &zone) == owner);
                    let value_matches = r
                        .get("records")
                        .and_then(|v| v.as_array())
                        .is_some_and(|records| {
                            records
                                .iter()
                                .any(|v| v.as_str() == Some(handle.value.as_str()))
                        });
                    name_matches && value_matches
                });
                match found.and_then(|r| r.get("id")).and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        log::warn!("[huawei] No matching TXT recordset to remove, skipping");
                        return Ok(());
                    }
                }
            }
        };

        log::info!("[huawei] Removing TXT recordset {record_id} in zone {zone}");
        self.call(
            Method::DELETE,
            &format!("/v2/zones/{zone}/recordsets/{record_id}"),
            None,
        )
        .await?;
        Ok(())
    }

    async fn list_txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let zone = split_zone(domain);

        let response = self
            .call(
                Method::GET,
                &format!("/v2/zones/{zone}/recordsets?type=TXT"),
                None,
            )
            .await?;

        let recordsets = response
            .get("recordsets")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(recordsets
            .iter()
            .flat_map(|r| {
                let name = zone_relative_owner(
                    r.get("name").and_then(|n| n.as_str()).unwrap_or_default(),
                    &zone,
                );
                let ttl = r
                    .get("ttl")
                    .and_then(serde_json::Value::as_u64)
                    .map(|t| u32::try_from(t).unwrap_or(u32::MAX));
                r.get("records")
                    .and_then(|v| v.as_array())
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(move |v| {
                        v.as_str().map(|value| TxtRecord {
                            name: name.clone(),
                            // Recordset values may come back quoted
                            value: value.trim_matches('"').to_string(),
                            ttl,
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect())
    }
}
