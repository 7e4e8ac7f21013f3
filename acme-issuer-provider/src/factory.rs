//! Provider factory functions.

use std::sync::Arc;

use reqwest::Client;

use crate::traits::DnsProvider;
use crate::types::ProviderCredentials;

#[cfg(feature = "aliyun")]
use crate::providers::AliyunProvider;
#[cfg(feature = "baidu")]
use crate::providers::BaiduProvider;
#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;
#[cfg(feature = "dnspod")]
use crate::providers::DnspodProvider;
#[cfg(feature = "huawei")]
use crate::providers::HuaweiProvider;
#[cfg(feature = "route53")]
use crate::providers::Route53Provider;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`]
/// variant. The HTTP client is an explicit dependency so callers control
/// connection pooling and TLS configuration; use
/// [`create_http_client`](crate::create_http_client) for sensible defaults.
pub fn create_provider(
    credentials: ProviderCredentials,
    http_client: Client,
) -> Arc<dyn DnsProvider> {
    match credentials {
        #[cfg(feature = "dnspod")]
        ProviderCredentials::Dnspod { api_id, api_token } => {
            Arc::new(DnspodProvider::new(http_client, api_id, api_token))
        }
        #[cfg(feature = "aliyun")]
        ProviderCredentials::Aliyun {
            access_key_id,
            access_key_secret,
        } => Arc::new(AliyunProvider::new(
            http_client,
            access_key_id,
            access_key_secret,
        )),
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { api_token, zone_id } => {
            Arc::new(CloudflareProvider::new(http_client, api_token, zone_id))
        }
        #[cfg(feature = "route53")]
        ProviderCredentials::Route53 {
            access_key_id,
            secret_access_key,
            region,
            hosted_zone_id,
        } => Arc::new(Route53Provider::new(
            http_client,
            access_key_id,
            secret_access_key,
            region,
            hosted_zone_id,
        )),
        #[cfg(feature = "baidu")]
        ProviderCredentials::Baidu {
            access_key_id,
            secret_access_key,
            region,
        } => Arc::new(BaiduProvider::new(
            http_client,
            access_key_id,
            secret_access_key,
            region,
        )),
        #[cfg(feature = "huawei")]
        ProviderCredentials::Huawei {
            access_key_id,
            secret_access_key,
            region,
            project_id,
        } => Arc::new(HuaweiProvider::new(
            http_client,
            access_key_id,
            secret_access_key,
            region,
            project_id,
        )),
    }
}
