//! Unified error type for the issuance pipeline

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use acme_issuer_provider::ProviderError;

/// Issuance pipeline error type.
///
/// Each variant corresponds to one step of the order lifecycle, so callers
/// can tell which stage aborted the run. TXT-record cleanup failure is
/// deliberately absent: it is reported as an
/// [`IssuanceWarning`](crate::types::IssuanceWarning), never as an error.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum IssuanceError {
    /// ACME account registration failed
    #[error("Account creation failed: {0}")]
    AccountCreation(String),

    /// ACME order creation failed
    #[error("Order creation failed: {0}")]
    OrderCreation(String),

    /// An authorization offered no dns-01 challenge
    #[error("No dns-01 challenge offered for {0}")]
    ChallengeNotFound(String),

    /// DNS provider error (converted from the provider library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// The published TXT record never became observable
    #[error("TXT record {record_name} did not propagate within {waited_secs}s")]
    PropagationTimeout {
        record_name: String,
        waited_secs: u64,
    },

    /// The ACME server judged the challenge invalid
    #[error("Challenge rejected: {0}")]
    ChallengeRejected(String),

    /// CSR submission or order status polling failed
    #[error("Order finalization failed: {0}")]
    Finalize(String),

    /// The certificate chain could not be downloaded
    #[error("Certificate download failed: {0}")]
    CertificateDownload(String),

    /// Key pair or CSR generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
}

impl IssuanceError {
    /// Whether this is expected behavior (environment, user input) used for
    /// log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ChallengeNotFound(_) | Self::PropagationTimeout { .. } => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Issuance Result type alias
pub type IssuanceResult<T> = std::result::Result<T, IssuanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagation_timeout_is_expected() {
        let err = IssuanceError::PropagationTimeout {
            record_name: "_acme-challenge.example.com".into(),
            waited_secs: 120,
        };
        assert!(err.is_expected());
    }

    #[test]
    fn finalize_error_is_unexpected() {
        assert!(!IssuanceError::Finalize("order went invalid".into()).is_expected());
    }

    #[test]
    fn provider_error_classification_is_delegated() {
        let err = IssuanceError::Provider(ProviderError::InvalidCredentials {
            provider: "cloudflare".into(),
            raw_message: None,
        });
        assert!(err.is_expected());

        let err = IssuanceError::Provider(ProviderError::NetworkError {
            provider: "cloudflare".into(),
            detail: "connection reset".into(),
        });
        assert!(!err.is_expected());
    }

    #[test]
    fn display_carries_step_context() {
        let err = IssuanceError::PropagationTimeout {
            record_name: "_acme-challenge.example.com".into(),
            waited_secs: 120,
        };
        assert_eq!(
            err.to_string(),
            "TXT record _acme-challenge.example.com did not propagate within 120s"
        );
    }
}
