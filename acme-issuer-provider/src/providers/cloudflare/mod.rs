//! Cloudflare DNS provider (REST v4 API).

mod error;
mod provider;
mod types;

use reqwest::Client;

pub(crate) use types::{CfDnsRecord, CfResponse};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare DNS Records API maximum page size.
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare DNS provider.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) zone_id: String,
    pub(crate) max_retries: u32,
}

impl CloudflareProvider {
    pub fn new(client: Client, api_token: String, zone_id: String) -> Self {
        Self {
            client,
            api_token,
            zone_id,
            max_retries: 2,
        }
    }
}
