//! Key pair and CSR generation

use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;

use crate::error::{IssuanceError, IssuanceResult};
use crate::types::{EcCurve, KeyType, RsaKeySize};

/// Private key plus the CSR binding it to the requested domain.
pub struct KeyMaterial {
    /// PKCS#8 PEM-encoded private key
    pub private_key_pem: String,
    /// DER-encoded PKCS#10 certificate signing request
    pub csr_der: Vec<u8>,
}

/// Generates a private key per the requested algorithm and a CSR with the
/// domain as commonName.
///
/// RSA key generation is CPU bound (seconds for 4096-bit moduli); callers
/// run this on a blocking thread.
pub fn generate_key_and_csr(domain: &str, key_type: KeyType) -> IssuanceResult<KeyMaterial> {
    let (private_key_pem, key_pair) = match key_type {
        KeyType::Rsa(size) => generate_rsa(size)?,
        KeyType::Ecdsa(curve) => generate_ecdsa(curve)?,
    };

    let mut params = CertificateParams::new(vec![domain.to_string()])
        .map_err(|e| IssuanceError::KeyGeneration(e.to_string()))?;
    let mut distinguished_name = DistinguishedName::new();
    distinguished_name.push(DnType::CommonName, domain);
    params.distinguished_name = distinguished_name;

    let csr = params
        .serialize_request(&key_pair)
        .map_err(|e| IssuanceError::KeyGeneration(e.to_string()))?;

    Ok(KeyMaterial {
        private_key_pem,
        csr_der: csr.der().as_ref().to_vec(),
    })
}

fn generate_rsa(size: RsaKeySize) -> IssuanceResult<(String, KeyPair)> {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, size.bits())
        .map_err(|e| IssuanceError::KeyGeneration(e.to_string()))?;
    let pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| IssuanceError::KeyGeneration(e.to_string()))?
        .to_string();

    // rcgen signs the CSR, so re-import the key on its side
    let key_pair =
        KeyPair::from_pem(&pem).map_err(|e| IssuanceError::KeyGeneration(e.to_string()))?;
    Ok((pem, key_pair))
}

fn generate_ecdsa(curve: EcCurve) -> IssuanceResult<(String, KeyPair)> {
    let algorithm = match curve {
        EcCurve::P256 => &rcgen::PKCS_ECDSA_P256_SHA256,
        EcCurve::P384 => &rcgen::PKCS_ECDSA_P384_SHA384,
        EcCurve::P521 => &rcgen::PKCS_ECDSA_P521_SHA512,
    };
    let key_pair = KeyPair::generate_for(algorithm)
        .map_err(|e| IssuanceError::KeyGeneration(e.to_string()))?;
    Ok((key_pair.serialize_pem(), key_pair))
}
