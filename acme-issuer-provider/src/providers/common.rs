//! Shared provider utilities.

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha1::Sha1;
use sha2::Sha256;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// TTL applied to challenge TXT records, in seconds.
pub const TXT_TTL: u32 = 600;

/// Create an HTTP client with timeout configuration.
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

// ============ HMAC ============

/// HMAC-SHA1 (used by the aliyun signature).
pub fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// HMAC-SHA256 (used by the baidu/route53 signatures).
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// RFC 3986 percent-encoding (unreserved characters pass through).
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

// ============ Domain name handling ============

/// Strip the trailing dot from a domain name.
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// Derive the registrable zone from a (possibly subdomained) domain.
///
/// Last-two-labels heuristic: `"sub.www.example.com"` -> `"example.com"`.
/// Domains of two labels or fewer are returned as-is. Multi-label public
/// suffixes (`.co.uk` etc.) are not special-cased.
pub fn split_zone(domain: &str) -> String {
    let normalized = normalize_domain_name(domain);
    let labels: Vec<&str> = normalized.split('.').collect();
    if labels.len() <= 2 {
        normalized
    } else {
        labels[labels.len() - 2..].join(".")
    }
}

/// Reduce a full record name to the zone-relative owner name.
///
/// `"_acme-challenge.www.example.com"` + `"example.com"` -> `"_acme-challenge.www"`,
/// `"example.com"` + `"example.com"` -> `"@"`.
pub fn zone_relative_owner(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full == zone {
        "@".to_string()
    } else if let Some(owner) = full.strip_suffix(&format!(".{zone}")) {
        owner.to_string()
    } else {
        full
    }
}

/// Expand a zone-relative owner name back to the full record name.
pub fn owner_to_full_name(owner: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);

    if owner == "@" || owner.is_empty() {
        zone
    } else {
        format!("{owner}.{zone}")
    }
}
