//! # acme-issuer-core
//!
//! Certificate issuance orchestrator for the ACME DNS-01 challenge.
//!
//! One [`IssuanceService::issue`] call runs the whole order lifecycle:
//! account registration → order → authorizations → TXT-record publication
//! and propagation wait → challenge validation → CSR finalize → certificate
//! download. DNS backends are reached through the
//! [`acme-issuer-provider`](acme_issuer_provider) abstraction; the ACME
//! server through the [`AcmeOrderSession`] trait (production implementation:
//! [`InstantAcmeSession`] over `instant-acme`).
//!
//! ```rust,no_run
//! use acme_issuer_core::{IssuanceRequest, IssuanceService, KeyType, RsaKeySize};
//! use acme_issuer_provider::{create_http_client, create_provider, ProviderCredentials};
//!
//! # async fn example() -> Result<(), acme_issuer_core::IssuanceError> {
//! let provider = create_provider(
//!     ProviderCredentials::Cloudflare {
//!         api_token: "token".to_string(),
//!         zone_id: "zone".to_string(),
//!     },
//!     create_http_client(),
//! );
//!
//! let service = IssuanceService::new(provider);
//! let result = service
//!     .issue_with_lets_encrypt(IssuanceRequest {
//!         domain: "www.example.com".to_string(),
//!         contact_email: "admin@example.com".to_string(),
//!         staging: true,
//!         key_type: KeyType::Rsa(RsaKeySize::Rsa2048),
//!     })
//!     .await?;
//! println!("issued, expires {}", result.valid_to);
//! # Ok(())
//! # }
//! ```

pub mod acme;
pub mod crypto;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use acme::InstantAcmeSession;
pub use error::{IssuanceError, IssuanceResult, ProviderError};
pub use services::{
    dns_txt_digest, ChallengeCoordinator, IssuanceService, PropagationConfig, PropagationStrategy,
    PropagationWaiter,
};
pub use traits::{AcmeAuthorization, AcmeChallenge, AcmeOrderSession};
pub use types::{
    CertificateResult, EcCurve, IssuancePhase, IssuanceRequest, IssuanceWarning, KeyType,
    RsaKeySize,
};
