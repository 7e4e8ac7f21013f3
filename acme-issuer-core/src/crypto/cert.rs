//! Certificate chain splitting and leaf metadata extraction

use chrono::{DateTime, Duration, Utc};
use x509_parser::pem::Pem;

use crate::types::IssuanceWarning;

/// Metadata extracted from the leaf certificate.
#[derive(Debug, Clone)]
pub struct CertificateMetadata {
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub issuer_cn: String,
    pub subject_cn: String,
    pub serial_number: String,
}

/// Splits a downloaded PEM bundle into (leaf, intermediates).
///
/// The first certificate block is the leaf; the remainder is the chain.
/// Returns empty strings for blocks that are not present.
pub fn split_chain(bundle: &str) -> (String, String) {
    let blocks = pem_blocks(bundle);
    match blocks.split_first() {
        Some((leaf, rest)) => (leaf.clone(), rest.concat()),
        None => (String::new(), String::new()),
    }
}

fn pem_blocks(bundle: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;
    for line in bundle.lines() {
        let line = line.trim_end();
        if line == "-----BEGIN CERTIFICATE-----" {
            current = Some(String::new());
        }
        if let Some(block) = current.as_mut() {
            block.push_str(line);
            block.push('\n');
        }
        if line == "-----END CERTIFICATE-----" {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
        }
    }
    blocks
}

/// Extracts validity window, issuer/subject common names and serial number
/// from a PEM leaf certificate.
///
/// On parse failure the issuance still succeeds with the certificate as
/// downloaded, so this degrades to synthetic metadata (issuer "Unknown",
/// subject = requested domain, validity now..+90 days) and reports the
/// substitution as a [`IssuanceWarning::MetadataParse`] warning.
pub fn parse_certificate(
    leaf_pem: &str,
    domain: &str,
) -> (CertificateMetadata, Option<IssuanceWarning>) {
    match try_parse(leaf_pem) {
        Ok(metadata) => (metadata, None),
        Err(detail) => {
            log::warn!("[issuance] Failed to parse leaf certificate: {detail}");
            let now = Utc::now();
            let metadata = CertificateMetadata {
                valid_from: now,
                valid_to: now + Duration::days(90),
                issuer_cn: "Unknown".to_string(),
                subject_cn: domain.to_string(),
                serial_number: String::new(),
            };
            (metadata, Some(IssuanceWarning::MetadataParse { detail }))
        }
    }
}

fn try_parse(leaf_pem: &str) -> Result<CertificateMetadata, String> {
    let pem = Pem::iter_from_buffer(leaf_pem.as_bytes())
        .next()
        .ok_or_else(|| "no PEM block found".to_string())?
        .map_err(|e| e.to_string())?;
    let certificate = pem.parse_x509().map_err(|e| e.to_string())?;

    let validity = certificate.validity();
    let valid_from = DateTime::<Utc>::from_timestamp(validity.not_before.timestamp(), 0)
        .ok_or_else(|| "notBefore out of range".to_string())?;
    let valid_to = DateTime::<Utc>::from_timestamp(validity.not_after.timestamp(), 0)
        .ok_or_else(|| "notAfter out of range".to_string())?;

    let issuer_cn = common_name(certificate.issuer()).unwrap_or_else(|| "Unknown".to_string());
    let subject_cn = common_name(certificate.subject()).unwrap_or_default();

    Ok(CertificateMetadata {
        valid_from,
        valid_to,
        issuer_cn,
        subject_cn,
        serial_number: certificate.raw_serial_as_string(),
    })
}

fn common_name(name: &x509_parser::x509::X509Name<'_>) -> Option<String> {
    name.iter_common_name()
        .next()
        .and_then(|attr| attr.as_str().ok())
        .map(ToString::to_string)
}
