//! DNS-01 challenge coordinator

use std::sync::Arc;

use acme_issuer_provider::DnsProvider;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::error::{IssuanceError, IssuanceResult};
use crate::services::{PropagationConfig, PropagationWaiter};
use crate::traits::{AcmeAuthorization, AcmeOrderSession};
use crate::types::IssuanceWarning;

/// DNS-01 proof value: base64url(SHA-256(key authorization)), unpadded.
/// Deterministic; published as the TXT record content.
#[must_use]
pub fn dns_txt_digest(key_authorization: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(key_authorization.as_bytes()))
}

/// Drives one authorization through publish → wait → notify → poll →
/// cleanup.
pub struct ChallengeCoordinator {
    provider: Arc<dyn DnsProvider>,
    waiter: PropagationWaiter,
}

impl ChallengeCoordinator {
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>, config: PropagationConfig) -> Self {
        Self {
            provider,
            waiter: PropagationWaiter::new(config),
        }
    }

    /// Satisfies the dns-01 challenge of one authorization.
    ///
    /// Once the TXT record is published, removal is attempted on every exit
    /// path; a removal failure is reported through `warnings` and never
    /// changes the validation outcome.
    pub async fn satisfy(
        &self,
        session: &mut dyn AcmeOrderSession,
        authorization: &AcmeAuthorization,
        warnings: &mut Vec<IssuanceWarning>,
    ) -> IssuanceResult<()> {
        let challenge = authorization.dns01_challenge().ok_or_else(|| {
            IssuanceError::ChallengeNotFound(authorization.identifier.clone())
        })?;

        let key_authorization = session.key_authorization(challenge)?;
        let digest = dns_txt_digest(&key_authorization);
        let domain = authorization.identifier.as_str();
        let record_name = format!("_acme-challenge.{domain}");

        log::info!(
            "[challenge] Publishing TXT {record_name} via {}",
            self.provider.id()
        );
        let handle = self
            .provider
            .add_txt_record(domain, &record_name, &digest)
            .await?;

        let outcome = self
            .validate(session, domain, &record_name, &digest, &challenge.url)
            .await;

        // Cleanup runs whether validation succeeded or not
        if let Err(e) = self.provider.remove_txt_record(domain, &handle).await {
            log::warn!("[challenge] Failed to remove TXT {record_name}: {e}");
            warnings.push(IssuanceWarning::CleanupFailed {
                provider: self.provider.id().to_string(),
                record_name,
                detail: e.to_string(),
            });
        } else {
            log::info!("[challenge] Removed TXT {record_name}");
        }

        outcome
    }

    async fn validate(
        &self,
        session: &mut dyn AcmeOrderSession,
        domain: &str,
        record_name: &str,
        digest: &str,
        challenge_url: &str,
    ) -> IssuanceResult<()> {
        self.waiter
            .wait_for_txt(&self.provider, domain, record_name, digest)
            .await?;
        session.mark_challenge_ready(challenge_url).await?;
        session.wait_challenge_valid().await
    }
}
