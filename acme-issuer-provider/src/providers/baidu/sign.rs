//! Baidu BCE `bce-auth-v1` request signing
//!
//! Reference: <https://cloud.baidu.com/doc/Reference/s/Njwvz1wot>

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::providers::common::{hmac_sha256, percent_encode};

use super::{BaiduProvider, BAIDU_AUTH_EXPIRES_SECS, EMPTY_BODY_SHA256};

impl BaiduProvider {
    /// Compute the `Authorization` header value.
    ///
    /// Signs the canonical request (method, URI, sorted query, sorted headers,
    /// signed-headers list, empty-body hash) under
    /// `bce-auth-v1/{access_key}/{timestamp}/{expires}`; the hex HMAC-SHA256
    /// signature is appended to that prefix.
    pub(crate) fn sign(
        &self,
        method: &str,
        uri: &str,
        query: &BTreeMap<String, String>,
        headers: &BTreeMap<String, String>,
        timestamp: &str,
    ) -> String {
        let auth_prefix = format!(
            "bce-auth-v1/{}/{timestamp}/{BAIDU_AUTH_EXPIRES_SECS}",
            self.access_key_id
        );

        let canonical_query = query
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        // Header names sorted and lower-cased; trailing newline is part of the
        // canonical form
        let canonical_headers = headers
            .iter()
            .map(|(k, v)| format!("{}:{v}\n", k.to_lowercase()))
            .collect::<String>();

        let signed_headers = headers
            .keys()
            .map(|k| k.to_lowercase())
            .collect::<Vec<_>>()
            .join(";");

        let canonical_request = format!(
            "{method}\n{uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{EMPTY_BODY_SHA256}"
        );

        log::debug!("[baidu] CanonicalRequest:\n{canonical_request}");

        let hashed = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!("{auth_prefix}\n{hashed}");

        let signature = hex::encode(hmac_sha256(
            self.secret_access_key.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        format!("{auth_prefix}/{signature}")
    }
}
