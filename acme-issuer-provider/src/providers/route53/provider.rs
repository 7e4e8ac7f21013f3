//! `DnsProvider` implementation for AWS Route 53

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{normalize_domain_name, split_zone, zone_relative_owner, TXT_TTL};
use crate::traits::{DnsProvider, ProviderErrorMapper, RawApiError};
use crate::types::{RecordHandle, TxtRecord};

use super::xml;
use super::{Change, ChangeAction, RecordSet, Route53Provider, ROUTE53_API_BASE};

impl Route53Provider {
    /// Execute a signed request against the hosted-zone API.
    ///
    /// Error responses are XML documents carrying `Code`/`Message` elements.
    async fn call(&self, method: Method, path: &str, body: Option<String>) -> Result<String> {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let authorization = self.sign(method.as_str(), path, &timestamp);
        let method_name = method.to_string();

        let mut request = self
            .client
            .request(method, format!("{ROUTE53_API_BASE}{path}"))
            .header("Content-Type", "application/xml")
            .header("X-Amz-Date", timestamp)
            .header("Authorization", authorization);
        if let Some(body) = body {
            request = request.body(body);
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
            let raw = match (
                xml::extract_tag(&response_text, "Code"),
                xml::extract_tag(&response_text, "Message"),
            ) {
                (Some(code), Some(message)) => RawApiError::with_code(code, message),
                _ => RawApiError::new(format!("HTTP {status}: {response_text}")),
            };
            log::error!("[route53] API error: {}", raw.message);
            return Err(self.map_error(raw));
        }

        Ok(response_text)
    }

    /// Record name as Route 53 stores it: FQDN with trailing dot.
    fn fqdn(name: &str) -> String {
        format!("{}.", normalize_domain_name(name))
    }

    /// TXT values are stored wrapped in double quotes.
    fn quoted(value: &str) -> String {
        format!("\"{value}\"")
    }

    async fn list_record_sets(&self) -> Result<Vec<RecordSet>> {
        let response = self
            .call(
                Method::GET,
                &format!("/hostedzone/{}/rrset?type=TXT", self.hosted_zone_id),
                None,
            )
            .await?;
        Ok(xml::parse_record_sets(&response))
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    fn id(&self) -> &'static str {
        "route53"
    }

    async fn add_txt_record(
        &self,
        _domain: &str,
        record_name: &str,
        value: &str,
    ) -> Result<RecordHandle> {
        let fqdn = Self::fqdn(record_name);
        log::info!("[route53] Creating TXT record {fqdn}");

        let body = xml::build_change_batch(&[Change {
            action: ChangeAction::Create,
            name: fqdn,
            ttl: TXT_TTL,
            values: vec![Self::quoted(value)],
        }]);

        self.call(
            Method::POST,
            &format!("/hostedzone/{}/rrset", self.hosted_zone_id),
            Some(body),
        )
        .await?;

        // Change batches return no record id; deletion matches name + value
        Ok(RecordHandle {
            id: None,
            name: record_name.to_string(),
            value: value.to_string(),
        })
    }

    async fn remove_txt_record(&self, _domain: &str, handle: &RecordHandle) -> Result<()> {
        let fqdn = Self::fqdn(&handle.name);
        let quoted = Self::quoted(&handle.value);

        // DELETE must describe the record set exactly as it exists, so look
        // it up first
        let sets = self.list_record_sets().await?;
        let Some(existing) = sets.iter().find(|s| {
            s.record_type == "TXT" && s.name == fqdn && s.values.iter().any(|v| v == &quoted)
        }) else {
            log::warn!("[route53] No matching TXT record set to remove, skipping");
            return Ok(());
        };

        log::info!("[route53] Removing TXT record {fqdn}");
        let body = xml::build_change_batch(&[Change {
            action: ChangeAction::Delete,
            name: existing.name.clone(),
            ttl: existing.ttl.unwrap_or(TXT_TTL),
            values: existing.values.clone(),
        }]);

        self.call(
            Method::POST,
            &format!("/hostedzone/{}/rrset", self.hosted_zone_id),
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn list_txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let zone = split_zone(domain);
        let sets = self.list_record_sets().await?;

        Ok(sets
            .into_iter()
            .filter(|s| s.record_type == "TXT")
            .flat_map(|s| {
                let name = zone_relative_owner(&s.name, &zone);
                let ttl = s.ttl;
                s.values
                    .into_iter()
                    .map(move |v| TxtRecord {
                        name: name.clone(),
                        value: v.trim_matches('"').to_string(),
                        ttl,
                    })
                    .collect::<Vec<_>>()
            })
            .collect())
    }
}
