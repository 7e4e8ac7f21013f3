//! Issuance request / result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Certificate key algorithm and size/curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "param")]
pub enum KeyType {
    /// RSA with the given modulus size
    Rsa(RsaKeySize),
    /// ECDSA on the given NIST curve
    Ecdsa(EcCurve),
}

impl Default for KeyType {
    fn default() -> Self {
        Self::Rsa(RsaKeySize::Rsa2048)
    }
}

/// Supported RSA modulus sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsaKeySize {
    #[serde(rename = "2048")]
    Rsa2048,
    #[serde(rename = "4096")]
    Rsa4096,
}

impl RsaKeySize {
    /// Modulus size in bits.
    #[must_use]
    pub fn bits(self) -> usize {
        match self {
            Self::Rsa2048 => 2048,
            Self::Rsa4096 => 4096,
        }
    }
}

/// Supported ECDSA curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EcCurve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
}

/// Input for one certificate issuance run.
///
/// Assumed already validated by the caller; immutable for the duration of
/// the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceRequest {
    /// Domain the certificate is requested for (may include subdomains)
    pub domain: String,
    /// Contact email registered with the ACME account
    pub contact_email: String,
    /// Use the staging directory instead of production
    #[serde(default)]
    pub staging: bool,
    /// Certificate key algorithm
    #[serde(default)]
    pub key_type: KeyType,
}

/// Result of one successful issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResult {
    pub private_key_pem: String,
    /// Leaf certificate only
    pub certificate_pem: String,
    /// Intermediates only (may be empty)
    pub chain_pem: String,
    /// Leaf plus intermediates, as downloaded
    pub full_chain_pem: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    #[serde(rename = "issuerCN")]
    pub issuer_cn: String,
    #[serde(rename = "subjectCN")]
    pub subject_cn: String,
    pub serial_number: String,
    /// Non-fatal problems encountered along the way
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<IssuanceWarning>,
}

/// Non-fatal problem attached to an otherwise successful issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IssuanceWarning {
    /// A published TXT record could not be removed after validation
    #[serde(rename_all = "camelCase")]
    CleanupFailed {
        provider: String,
        record_name: String,
        detail: String,
    },
    /// Leaf certificate metadata could not be parsed; the result carries
    /// synthetic metadata (issuer "Unknown", validity now..+90 days)
    MetadataParse { detail: String },
}

/// Orchestrator state machine phases, used for logging and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuancePhase {
    Init,
    AccountReady,
    OrderCreated,
    AuthorizationsResolved,
    ChallengesSatisfied,
    Finalized,
    CertificateRetrieved,
    Done,
}

impl std::fmt::Display for IssuancePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::AccountReady => "account-ready",
            Self::OrderCreated => "order-created",
            Self::AuthorizationsResolved => "authorizations-resolved",
            Self::ChallengesSatisfied => "challenges-satisfied",
            Self::Finalized => "finalized",
            Self::CertificateRetrieved => "certificate-retrieved",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}
