//! Test helpers: mock ACME session and mock DNS provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use acme_issuer_provider::{
    split_zone, zone_relative_owner, DnsProvider, ProviderError, RecordHandle,
    Result as ProviderResult, TxtRecord,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::IssuanceResult;
use crate::traits::{AcmeAuthorization, AcmeChallenge, AcmeOrderSession};

/// Leaf certificate: CN=test.example.org, issued by "Test Issuing CA",
/// serial 0a:1b:2c:3d:4e:5f, valid 2026-08-30 to 2027-08-30.
pub const TEST_LEAF_PEM: &str = "-----BEGIN CERTIFICATE-----
MIIBIjCByAIGChssPU5fMAoGCCqGSM49BAMCMBoxGDAWBgNVBAMMD1Rlc3QgSXNz
dWluZyBDQTAeFw0yNjA4MzAwNDQwMThaFw0yNzA4MzAwNDQwMThaMBsxGTAXBgNV
BAMMEHRlc3QuZXhhbXBsZS5vcmcwWTATBgcqhkjOPQIBBggqhkjOPQMBBwNCAARD
eSZ9UI2/OyZBZils6to4Dq8gvBYWc0jCyd3vwlYutwuN0c0ucmFYs2OHVmmsQM5M
KhdZNQERS4rTYoctWcRmMAoGCCqGSM49BAMCA0kAMEYCIQCYnTqT8mWesekAAErW
nwlbjPwgDeGkZJbfPsHPPlL4SQIhAOxPI0kJhOEI6A/L5uNjK/rledq4GmO1a6k8
HUzTO14B
-----END CERTIFICATE-----
";

/// Self-signed issuing CA for [`TEST_LEAF_PEM`].
pub const TEST_CA_PEM: &str = "-----BEGIN CERTIFICATE-----
MIIBiDCCAS+gAwIBAgIUUGp/as5X8ujrv1IdLymV2vtpqckwCgYIKoZIzj0EAwIw
GjEYMBYGA1UEAwwPVGVzdCBJc3N1aW5nIENBMB4XDTI2MDgzMDA0NDAxOFoXDTMx
MDgyOTA0NDAxOFowGjEYMBYGA1UEAwwPVGVzdCBJc3N1aW5nIENBMFkwEwYHKoZI
zj0CAQYIKoZIzj0DAQcDQgAE28jSGZwYppm5peaxEO95LfNSnVd7wvy0zyb34CDg
+KW0lHX+DJNg6rEqB56b69aYA6uYoVpgnUJdA51MM2L/4aNTMFEwHQYDVR0OBBYE
FHS9lvtA8MdhbNBqy2Up6fC/l6SeMB8GA1UdIwQYMBaAFHS9lvtA8MdhbNBqy2Up
6fC/l6SeMA8GA1UdEwEB/wQFMAMBAf8wCgYIKoZIzj0EAwIDRwAwRAIgU2RbFQW+
DqNwZtl/xxCVHN6FW00YYcn8QU+ufjwR/8wCIBDQc0ZXFFFjSzk9aIRVs2D9h08M
nROS1aHAq+Nozmug
-----END CERTIFICATE-----
";

/// Leaf + issuing CA, as an ACME server would deliver them.
pub fn test_chain_pem() -> String {
    format!("{TEST_LEAF_PEM}{TEST_CA_PEM}")
}

// ===== MockDnsProvider =====

/// In-memory DNS provider with call counters and injectable failures.
pub struct MockDnsProvider {
    records: RwLock<HashMap<String, String>>,
    /// When false, `list_txt_records` never reports published records
    visible: bool,
    add_error: RwLock<Option<ProviderError>>,
    remove_error: RwLock<Option<ProviderError>>,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            visible: true,
            add_error: RwLock::new(None),
            remove_error: RwLock::new(None),
            add_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose records never become observable.
    pub fn never_propagating() -> Self {
        Self {
            visible: false,
            ..Self::new()
        }
    }

    pub async fn set_add_error(&self, error: Option<ProviderError>) {
        *self.add_error.write().await = error;
    }

    pub async fn set_remove_error(&self, error: Option<ProviderError>) {
        *self.remove_error.write().await = error;
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn add_txt_record(
        &self,
        _domain: &str,
        record_name: &str,
        value: &str,
    ) -> ProviderResult<RecordHandle> {
        let call = self.add_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(error) = self.add_error.read().await.clone() {
            return Err(error);
        }
        self.records
            .write()
            .await
            .insert(record_name.to_string(), value.to_string());
        Ok(RecordHandle {
            id: Some(format!("mock-{call}")),
            name: record_name.to_string(),
            value: value.to_string(),
        })
    }

    async fn remove_txt_record(&self, _domain: &str, handle: &RecordHandle) -> ProviderResult<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.remove_error.read().await.clone() {
            return Err(error);
        }
        self.records.write().await.remove(&handle.name);
        Ok(())
    }

    async fn list_txt_records(&self, domain: &str) -> ProviderResult<Vec<TxtRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.visible {
            return Ok(vec![]);
        }
        let zone = split_zone(domain);
        Ok(self
            .records
            .read()
            .await
            .iter()
            .map(|(name, value)| TxtRecord {
                name: zone_relative_owner(name, &zone),
                value: value.clone(),
                ttl: Some(600),
            })
            .collect())
    }
}

// ===== MockAcmeSession =====

/// ACME session whose server always accepts the challenge.
pub struct MockAcmeSession {
    domain: RwLock<Option<String>>,
    /// When false, authorizations offer no dns-01 candidate
    offer_dns01: bool,
    chain_pem: String,
    account_calls: AtomicUsize,
    order_calls: AtomicUsize,
    authorization_calls: AtomicUsize,
    ready_calls: AtomicUsize,
    finalize_calls: AtomicUsize,
}

impl MockAcmeSession {
    pub fn new() -> Self {
        Self::with_chain(test_chain_pem())
    }

    /// Session delivering the given PEM bundle on download.
    pub fn with_chain(chain_pem: String) -> Self {
        Self {
            domain: RwLock::new(None),
            offer_dns01: true,
            chain_pem,
            account_calls: AtomicUsize::new(0),
            order_calls: AtomicUsize::new(0),
            authorization_calls: AtomicUsize::new(0),
            ready_calls: AtomicUsize::new(0),
            finalize_calls: AtomicUsize::new(0),
        }
    }

    /// Session whose authorizations offer only http-01.
    pub fn without_dns01() -> Self {
        Self {
            offer_dns01: false,
            ..Self::new()
        }
    }

    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    pub fn authorization_calls(&self) -> usize {
        self.authorization_calls.load(Ordering::SeqCst)
    }

    pub fn ready_calls(&self) -> usize {
        self.ready_calls.load(Ordering::SeqCst)
    }

    pub fn finalize_calls(&self) -> usize {
        self.finalize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AcmeOrderSession for MockAcmeSession {
    async fn create_account(&mut self, _contact_email: &str, _staging: bool) -> IssuanceResult<()> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_order(&mut self, domain: &str) -> IssuanceResult<()> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        *self.domain.write().await = Some(domain.to_string());
        Ok(())
    }

    async fn authorizations(&mut self) -> IssuanceResult<Vec<AcmeAuthorization>> {
        self.authorization_calls.fetch_add(1, Ordering::SeqCst);
        let domain = self
            .domain
            .read()
            .await
            .clone()
            .unwrap_or_else(|| "example.com".to_string());

        let mut challenges = vec![AcmeChallenge {
            challenge_type: "http-01".to_string(),
            token: "mock-http-token".to_string(),
            url: "https://acme.invalid/chall/http".to_string(),
        }];
        if self.offer_dns01 {
            challenges.push(AcmeChallenge {
                challenge_type: "dns-01".to_string(),
                token: "mock-token".to_string(),
                url: "https://acme.invalid/chall/dns".to_string(),
            });
        }

        Ok(vec![AcmeAuthorization {
            identifier: domain,
            challenges,
        }])
    }

    fn key_authorization(&self, challenge: &AcmeChallenge) -> IssuanceResult<String> {
        Ok(format!("{}.mock-thumbprint", challenge.token))
    }

    async fn mark_challenge_ready(&mut self, _challenge_url: &str) -> IssuanceResult<()> {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn wait_challenge_valid(&mut self) -> IssuanceResult<()> {
        Ok(())
    }

    async fn finalize(&mut self, _csr_der: &[u8]) -> IssuanceResult<()> {
        self.finalize_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn download_certificate(&mut self) -> IssuanceResult<String> {
        Ok(self.chain_pem.clone())
    }
}
