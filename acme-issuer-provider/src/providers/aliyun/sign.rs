//! Aliyun RPC-style HMAC-SHA1 request signing
//!
//! Reference: <https://help.aliyun.com/zh/dns/signature-method>

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::providers::common::{hmac_sha1, percent_encode};

use super::AliyunProvider;

impl AliyunProvider {
    /// Canonicalized query string: parameters sorted by key, key and value
    /// RFC 3986 percent-encoded.
    pub(crate) fn canonical_query(params: &BTreeMap<String, String>) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Compute the `Signature` parameter for a GET request.
    ///
    /// String-to-sign is `GET&%2F&{encode(canonical_query)}`, signed with
    /// HMAC-SHA1 under `{access_key_secret}&` and base64-encoded.
    pub(crate) fn sign(&self, params: &BTreeMap<String, String>) -> String {
        let canonical = Self::canonical_query(params);
        let string_to_sign = format!("GET&%2F&{}", percent_encode(&canonical));

        log::debug!("[aliyun] StringToSign: {string_to_sign}");

        let key = format!("{}&", self.access_key_secret);
        STANDARD.encode(hmac_sha1(key.as_bytes(), string_to_sign.as_bytes()))
    }
}
