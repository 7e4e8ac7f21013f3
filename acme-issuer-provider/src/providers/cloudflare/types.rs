//! Cloudflare API wire types

use serde::Deserialize;

/// Standard v4 response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct CfResponse<T> {
    pub success: bool,
    pub errors: Option<Vec<CfError>>,
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CfError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CfDnsRecord {
    pub id: String,
    /// Full record name (FQDN, no trailing dot).
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    pub ttl: Option<u32>,
}
