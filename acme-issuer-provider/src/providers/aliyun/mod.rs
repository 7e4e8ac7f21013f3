//! Aliyun DNS provider (`alidns.aliyuncs.com` RPC API).

mod error;
mod provider;
mod sign;

use reqwest::Client;

pub(crate) const ALIYUN_DNS_BASE: &str = "https://alidns.aliyuncs.com";
pub(crate) const ALIYUN_DNS_VERSION: &str = "2015-01-09";

/// Aliyun DNS provider.
pub struct AliyunProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
    pub(crate) max_retries: u32,
}

impl AliyunProvider {
    pub fn new(client: Client, access_key_id: String, access_key_secret: String) -> Self {
        Self {
            client,
            access_key_id,
            access_key_secret,
            max_retries: 2,
        }
    }
}
