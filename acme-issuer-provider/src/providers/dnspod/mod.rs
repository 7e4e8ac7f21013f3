//! `DNSPod` DNS provider (legacy `dnsapi.cn` API).

mod error;
mod provider;

use reqwest::Client;

pub(crate) const DNSPOD_API_BASE: &str = "https://dnsapi.cn";
/// Record line required by the legacy API ("default" line, in Chinese).
pub(crate) const DNSPOD_RECORD_LINE: &str = "默认";

/// `DNSPod` DNS provider.
pub struct DnspodProvider {
    pub(crate) client: Client,
    pub(crate) api_id: String,
    pub(crate) api_token: String,
    pub(crate) max_retries: u32,
}

impl DnspodProvider {
    pub fn new(client: Client, api_id: String, api_token: String) -> Self {
        Self {
            client,
            api_id,
            api_token,
            max_retries: 2,
        }
    }

    /// Legacy API authentication value: `"{api_id},{api_token}"`.
    pub(crate) fn login_token(&self) -> String {
        format!("{},{}", self.api_id, self.api_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::common::create_http_client;

    #[test]
    fn login_token_format() {
        let p = DnspodProvider::new(create_http_client(), "12345".into(), "abcdef".into());
        assert_eq!(p.login_token(), "12345,abcdef");
    }
}
