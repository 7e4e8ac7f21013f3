//! Baidu Cloud DNS provider (BCE API).

mod error;
mod provider;
mod sign;

use reqwest::Client;

pub(crate) const BAIDU_DNS_BASE: &str = "https://dns.baidubce.com";
pub(crate) const BAIDU_DNS_HOST: &str = "dns.baidubce.com";
/// Signature validity window in seconds.
pub(crate) const BAIDU_AUTH_EXPIRES_SECS: u32 = 1800;
/// SHA-256 of an empty body, hex-encoded.
pub(crate) const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Baidu Cloud DNS provider.
pub struct BaiduProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) secret_access_key: String,
    #[allow(dead_code)]
    pub(crate) region: String,
    pub(crate) max_retries: u32,
}

impl BaiduProvider {
    pub fn new(
        client: Client,
        access_key_id: String,
        secret_access_key: String,
        region: String,
    ) -> Self {
        Self {
            client,
            access_key_id,
            secret_access_key,
            region,
            max_retries: 2,
        }
    }
}
