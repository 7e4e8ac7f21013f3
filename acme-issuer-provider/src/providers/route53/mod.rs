//! AWS Route 53 DNS provider (XML API).

mod error;
mod provider;
mod sign;
mod xml;

use reqwest::Client;

pub(crate) use xml::{Change, ChangeAction, RecordSet};

pub(crate) const ROUTE53_API_BASE: &str = "https://route53.amazonaws.com/2013-04-01";

/// AWS Route 53 DNS provider.
pub struct Route53Provider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) secret_access_key: String,
    pub(crate) region: String,
    pub(crate) hosted_zone_id: String,
    pub(crate) max_retries: u32,
}

impl Route53Provider {
    pub fn new(
        client: Client,
        access_key_id: String,
        secret_access_key: String,
        region: String,
        hosted_zone_id: String,
    ) -> Self {
        Self {
            client,
            access_key_id,
            secret_access_key,
            region,
            hosted_zone_id,
            max_retries: 2,
        }
    }
}
