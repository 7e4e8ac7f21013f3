//! Abstraction over the external ACME order client.
//!
//! The orchestrator drives one order through its lifecycle via
//! [`AcmeOrderSession`]; the production implementation wraps `instant-acme`
//! ([`InstantAcmeSession`](crate::acme::InstantAcmeSession)), tests use a
//! mock.

use async_trait::async_trait;

use crate::error::IssuanceResult;

/// One challenge candidate offered by an authorization.
#[derive(Debug, Clone)]
pub struct AcmeChallenge {
    /// Challenge type identifier (`dns-01`, `http-01`, ...)
    pub challenge_type: String,
    /// Opaque token issued by the ACME server
    pub token: String,
    /// Challenge resource URL
    pub url: String,
}

/// One authorization with its challenge candidates.
#[derive(Debug, Clone)]
pub struct AcmeAuthorization {
    /// DNS identifier the authorization covers
    pub identifier: String,
    pub challenges: Vec<AcmeChallenge>,
}

impl AcmeAuthorization {
    /// The dns-01 candidate, if the server offered one.
    #[must_use]
    pub fn dns01_challenge(&self) -> Option<&AcmeChallenge> {
        self.challenges
            .iter()
            .find(|c| c.challenge_type == "dns-01")
    }
}

/// One ACME order lifecycle, from account registration to certificate
/// download. Exclusively owned by a single issuance run.
#[async_trait]
pub trait AcmeOrderSession: Send {
    /// Registers a fresh account with the directory (staging or production),
    /// agreeing to the terms of service.
    async fn create_account(&mut self, contact_email: &str, staging: bool) -> IssuanceResult<()>;

    /// Requests an order for exactly the given domain.
    async fn create_order(&mut self, domain: &str) -> IssuanceResult<()>;

    /// Fetches all authorizations referenced by the order.
    async fn authorizations(&mut self) -> IssuanceResult<Vec<AcmeAuthorization>>;

    /// Key authorization string (token + "." + account key thumbprint) for
    /// the given challenge.
    fn key_authorization(&self, challenge: &AcmeChallenge) -> IssuanceResult<String>;

    /// Tells the server the challenge response is in place.
    async fn mark_challenge_ready(&mut self, challenge_url: &str) -> IssuanceResult<()>;

    /// Polls until the server has validated the outstanding challenges,
    /// bounded by the session's polling limits.
    async fn wait_challenge_valid(&mut self) -> IssuanceResult<()>;

    /// Submits the CSR for the order.
    async fn finalize(&mut self, csr_der: &[u8]) -> IssuanceResult<()>;

    /// Downloads the issued certificate chain as a PEM bundle.
    async fn download_certificate(&mut self) -> IssuanceResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(challenge_type: &str) -> AcmeChallenge {
        AcmeChallenge {
            challenge_type: challenge_type.to_string(),
            token: "tok".to_string(),
            url: format!("https://acme.invalid/chall/{challenge_type}"),
        }
    }

    #[test]
    fn selects_dns01_among_candidates() {
        let authorization = AcmeAuthorization {
            identifier: "example.com".to_string(),
            challenges: vec![challenge("http-01"), challenge("dns-01")],
        };
        let selected = authorization.dns01_challenge().unwrap();
        assert_eq!(selected.challenge_type, "dns-01");
    }

    #[test]
    fn missing_dns01_yields_none() {
        let authorization = AcmeAuthorization {
            identifier: "example.com".to_string(),
            challenges: vec![challenge("http-01"), challenge("tls-alpn-01")],
        };
        assert!(authorization.dns01_challenge().is_none());
    }
}
