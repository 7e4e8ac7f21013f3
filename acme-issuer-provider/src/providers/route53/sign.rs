//! Route 53 request signing
//!
//! Signs the method, content type, timestamp and path with HMAC-SHA256 and
//! presents the result in an AWS4-style `Authorization` header with a
//! `host;x-amz-date` signed-headers scope.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::providers::common::hmac_sha256;

use super::Route53Provider;

impl Route53Provider {
    /// Compute the `Authorization` header for a request.
    ///
    /// `timestamp` is in compact ISO form (`20240115T080000Z`); its first
    /// eight characters form the credential-scope date.
    pub(crate) fn sign(&self, method: &str, path: &str, timestamp: &str) -> String {
        let string_to_sign = format!("{method}\n\napplication/xml\n{timestamp}\n{path}");

        log::debug!("[route53] StringToSign: {string_to_sign}");

        let signature = STANDARD.encode(hmac_sha256(
            self.secret_access_key.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        let scope_date = &timestamp[..timestamp.len().min(8)];
        format!(
            "AWS4-HMAC-SHA256 Credential={}/{}/{}/route53/aws4_request, \
             SignedHeaders=host;x-amz-date, Signature={}",
            self.access_key_id, scope_date, self.region, signature
        )
    }
}
