//! Certificate issuance orchestrator

use std::sync::Arc;

use acme_issuer_provider::DnsProvider;

use crate::acme::InstantAcmeSession;
use crate::crypto;
use crate::error::{IssuanceError, IssuanceResult};
use crate::services::{ChallengeCoordinator, PropagationConfig};
use crate::traits::AcmeOrderSession;
use crate::types::{CertificateResult, IssuancePhase, IssuanceRequest};

/// Runs the full ACME order lifecycle for one [`IssuanceRequest`]:
/// account → order → authorizations → challenges → finalize → download.
pub struct IssuanceService {
    provider: Arc<dyn DnsProvider>,
    propagation: PropagationConfig,
}

impl IssuanceService {
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>) -> Self {
        Self::with_propagation(provider, PropagationConfig::default())
    }

    #[must_use]
    pub fn with_propagation(provider: Arc<dyn DnsProvider>, propagation: PropagationConfig) -> Self {
        Self {
            provider,
            propagation,
        }
    }

    /// Issues a certificate against the Let's Encrypt directory selected by
    /// the request's staging flag.
    pub async fn issue_with_lets_encrypt(
        &self,
        request: IssuanceRequest,
    ) -> IssuanceResult<CertificateResult> {
        let mut session = InstantAcmeSession::new();
        self.issue(request, &mut session).await
    }

    /// Issues a certificate through the given ACME session.
    pub async fn issue(
        &self,
        request: IssuanceRequest,
        session: &mut dyn AcmeOrderSession,
    ) -> IssuanceResult<CertificateResult> {
        log::info!(
            "[issuance] phase={} domain={} staging={}",
            IssuancePhase::Init,
            request.domain,
            request.staging
        );

        session
            .create_account(&request.contact_email, request.staging)
            .await?;
        log::info!("[issuance] phase={}", IssuancePhase::AccountReady);

        session.create_order(&request.domain).await?;
        log::info!("[issuance] phase={}", IssuancePhase::OrderCreated);

        // Key and CSR generation is CPU bound and independent of the DNS
        // work; overlap it with authorization processing. It only has to
        // finish before finalize.
        let domain = request.domain.clone();
        let key_type = request.key_type;
        let key_task =
            tokio::task::spawn_blocking(move || crypto::generate_key_and_csr(&domain, key_type));

        let authorizations = session.authorizations().await?;
        log::info!(
            "[issuance] phase={} authorizations={}",
            IssuancePhase::AuthorizationsResolved,
            authorizations.len()
        );

        // Sequential on purpose: DNS providers are rate-limit sensitive and
        // records within one zone must not collide
        let coordinator = ChallengeCoordinator::new(self.provider.clone(), self.propagation.clone());
        let mut warnings = Vec::new();
        for authorization in &authorizations {
            coordinator
                .satisfy(session, authorization, &mut warnings)
                .await?;
        }
        log::info!("[issuance] phase={}", IssuancePhase::ChallengesSatisfied);

        let key_material = key_task
            .await
            .map_err(|e| IssuanceError::KeyGeneration(e.to_string()))??;

        session.finalize(&key_material.csr_der).await?;
        log::info!("[issuance] phase={}", IssuancePhase::Finalized);

        let full_chain_pem = session.download_certificate().await?;
        log::info!("[issuance] phase={}", IssuancePhase::CertificateRetrieved);

        let (certificate_pem, chain_pem) = crypto::split_chain(&full_chain_pem);
        if certificate_pem.is_empty() {
            return Err(IssuanceError::CertificateDownload(
                "downloaded chain contains no certificate".to_string(),
            ));
        }

        let (metadata, parse_warning) = crypto::parse_certificate(&certificate_pem, &request.domain);
        if let Some(warning) = parse_warning {
            warnings.push(warning);
        }

        log::info!(
            "[issuance] phase={} domain={} serial={}",
            IssuancePhase::Done,
            request.domain,
            metadata.serial_number
        );

        Ok(CertificateResult {
            private_key_pem: key_material.private_key_pem,
            certificate_pem,
            chain_pem,
            full_chain_pem,
            valid_from: metadata.valid_from,
            valid_to: metadata.valid_to,
            issuer_cn: metadata.issuer_cn,
            subject_cn: metadata.subject_cn,
            serial_number: metadata.serial_number,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use acme_issuer_provider::ProviderError;

    use super::*;
    use crate::services::PropagationStrategy;
    use crate::test_utils::{MockAcmeSession, MockDnsProvider};
    use crate::types::{EcCurve, IssuanceWarning, KeyType, RsaKeySize};

    fn fast_propagation() -> PropagationConfig {
        PropagationConfig {
            interval: Duration::from_millis(10),
            max_wait: Duration::from_millis(200),
            settle_delay: Duration::ZERO,
            strategy: PropagationStrategy::ProviderApi,
        }
    }

    fn request(domain: &str, key_type: KeyType) -> IssuanceRequest {
        IssuanceRequest {
            domain: domain.to_string(),
            contact_email: "admin@example.org".to_string(),
            staging: true,
            key_type,
        }
    }

    fn api_error() -> ProviderError {
        ProviderError::ApiError {
            provider: "mock".to_string(),
            code: Some("RecordInvalid".to_string()),
            message: "rejected".to_string(),
        }
    }

    #[tokio::test]
    async fn end_to_end_rsa_2048() {
        let provider = Arc::new(MockDnsProvider::new());
        let service = IssuanceService::with_propagation(provider.clone(), fast_propagation());
        let mut session = MockAcmeSession::new();

        let result = service
            .issue(
                request("test.example.org", KeyType::Rsa(RsaKeySize::Rsa2048)),
                &mut session,
            )
            .await
            .unwrap();

        assert_eq!(session.account_calls(), 1);
        assert_eq!(session.order_calls(), 1);
        assert_eq!(session.authorization_calls(), 1);
        assert_eq!(session.ready_calls(), 1);
        assert_eq!(session.finalize_calls(), 1);
        assert_eq!(provider.add_calls(), 1);
        assert_eq!(provider.remove_calls(), 1);

        assert!(!result.private_key_pem.is_empty());
        assert!(!result.certificate_pem.is_empty());
        assert!(result.valid_from < result.valid_to);
        assert_eq!(result.subject_cn, "test.example.org");
        assert_eq!(result.issuer_cn, "Test Issuing CA");
        assert!(!result.chain_pem.is_empty());
        assert!(result.full_chain_pem.starts_with(&result.certificate_pem));
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn never_propagating_record_fails_and_still_cleans_up() {
        let provider = Arc::new(MockDnsProvider::never_propagating());
        let service = IssuanceService::with_propagation(provider.clone(), fast_propagation());
        let mut session = MockAcmeSession::new();

        let err = service
            .issue(
                request("test.example.org", KeyType::Ecdsa(EcCurve::P256)),
                &mut session,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, IssuanceError::PropagationTimeout { .. }));
        assert_eq!(provider.add_calls(), 1);
        assert_eq!(provider.remove_calls(), 1);
        // The ACME server was never notified
        assert_eq!(session.ready_calls(), 0);
        assert_eq!(session.finalize_calls(), 0);
    }

    #[tokio::test]
    async fn add_record_error_aborts_before_polling() {
        let provider = Arc::new(MockDnsProvider::new());
        provider.set_add_error(Some(api_error())).await;
        let service = IssuanceService::with_propagation(provider.clone(), fast_propagation());
        let mut session = MockAcmeSession::new();

        let err = service
            .issue(
                request("test.example.org", KeyType::Ecdsa(EcCurve::P256)),
                &mut session,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IssuanceError::Provider(ProviderError::ApiError { .. })
        ));
        // No polling happened and nothing was removed for a record that was
        // never created
        assert_eq!(provider.list_calls(), 0);
        assert_eq!(provider.remove_calls(), 0);
    }

    #[tokio::test]
    async fn missing_dns01_challenge_is_fatal() {
        let provider = Arc::new(MockDnsProvider::new());
        let service = IssuanceService::with_propagation(provider.clone(), fast_propagation());
        let mut session = MockAcmeSession::without_dns01();

        let err = service
            .issue(
                request("test.example.org", KeyType::Ecdsa(EcCurve::P256)),
                &mut session,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, IssuanceError::ChallengeNotFound(_)));
        assert_eq!(provider.add_calls(), 0);
    }

    #[tokio::test]
    async fn cleanup_failure_is_a_warning_not_an_error() {
        let provider = Arc::new(MockDnsProvider::new());
        provider.set_remove_error(Some(api_error())).await;
        let service = IssuanceService::with_propagation(provider.clone(), fast_propagation());
        let mut session = MockAcmeSession::new();

        let result = service
            .issue(
                request("test.example.org", KeyType::Ecdsa(EcCurve::P256)),
                &mut session,
            )
            .await
            .unwrap();

        assert_eq!(provider.remove_calls(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            result.warnings[0],
            IssuanceWarning::CleanupFailed { .. }
        ));
    }

    #[tokio::test]
    async fn unparseable_certificate_degrades_with_warning() {
        let provider = Arc::new(MockDnsProvider::new());
        let service = IssuanceService::with_propagation(provider.clone(), fast_propagation());
        let mut session = MockAcmeSession::with_chain(
            "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n".to_string(),
        );

        let result = service
            .issue(
                request("test.example.org", KeyType::Ecdsa(EcCurve::P256)),
                &mut session,
            )
            .await
            .unwrap();

        assert_eq!(result.issuer_cn, "Unknown");
        assert_eq!(result.subject_cn, "test.example.org");
        assert!(result.valid_from < result.valid_to);
        assert!(matches!(
            result.warnings[0],
            IssuanceWarning::MetadataParse { .. }
        ));
    }

    #[tokio::test]
    async fn empty_download_is_a_download_error() {
        let provider = Arc::new(MockDnsProvider::new());
        let service = IssuanceService::with_propagation(provider.clone(), fast_propagation());
        let mut session = MockAcmeSession::with_chain(String::new());

        let err = service
            .issue(
                request("test.example.org", KeyType::Ecdsa(EcCurve::P256)),
                &mut session,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, IssuanceError::CertificateDownload(_)));
    }
}
