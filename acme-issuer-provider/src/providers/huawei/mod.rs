//! Huawei Cloud DNS provider.
//!
//! Authentication is two-step: an AK/SK scoped token is obtained from the IAM
//! endpoint and used as `X-Auth-Token` against the regional DNS endpoint. The
//! token is fetched per logical operation and never cached.

mod error;
mod provider;

use reqwest::Client;

pub(crate) const HUAWEI_IAM_TOKEN_URL: &str = "https://iam.myhuaweicloud.com/v3/auth/tokens";

/// Huawei Cloud DNS provider.
pub struct HuaweiProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) secret_access_key: String,
    pub(crate) region: String,
    pub(crate) project_id: String,
    pub(crate) max_retries: u32,
}

impl HuaweiProvider {
    pub fn new(
        client: Client,
        access_key_id: String,
        secret_access_key: String,
        region: String,
        project_id: String,
    ) -> Self {
        Self {
            client,
            access_key_id,
            secret_access_key,
            region,
            project_id,
            max_retries: 2,
        }
    }

    /// Regional DNS endpoint base URL.
    pub(crate) fn dns_base(&self) -> String {
        format!("https://dns.{}.myhuaweicloud.com", self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::common::create_http_client;

    #[test]
    fn dns_base_includes_region() {
        let p = HuaweiProvider::new(
            create_http_client(),
            String::new(),
            String::new(),
            "cn-north-4".into(),
            String::new(),
        );
        assert_eq!(p.dns_base(), "https://dns.cn-north-4.myhuaweicloud.com");
    }
}
