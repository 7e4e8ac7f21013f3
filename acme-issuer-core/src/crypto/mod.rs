//! Cryptographic primitives: key pair / CSR generation and certificate
//! metadata extraction.

mod cert;
mod keys;

pub use cert::{parse_certificate, split_chain, CertificateMetadata};
pub use keys::{generate_key_and_csr, KeyMaterial};
