//! DNS propagation waiter

use std::sync::Arc;
use std::time::Duration;

use acme_issuer_provider::{split_zone, zone_relative_owner, DnsProvider};
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::TokioResolver;
use tokio::time::Instant;

use crate::error::{IssuanceError, IssuanceResult};

/// How a published TXT record is checked for visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationStrategy {
    /// Query public resolvers for the TXT record
    PublicDns,
    /// Re-list the provider's own records and match name + value
    ProviderApi,
}

/// Polling parameters for the propagation wait.
#[derive(Debug, Clone)]
pub struct PropagationConfig {
    /// Delay between polls
    pub interval: Duration,
    /// Maximum wall-clock time before giving up
    pub max_wait: Duration,
    /// Extra delay after the first match, absorbing resolver cache skew
    pub settle_delay: Duration,
    pub strategy: PropagationStrategy,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(120),
            settle_delay: Duration::from_secs(10),
            strategy: PropagationStrategy::PublicDns,
        }
    }
}

/// Polls until a specific TXT value is observable, bounded by wall-clock
/// time.
pub struct PropagationWaiter {
    config: PropagationConfig,
}

impl PropagationWaiter {
    #[must_use]
    pub fn new(config: PropagationConfig) -> Self {
        Self { config }
    }

    /// Waits until `record_name` resolves to `value`, then sleeps the settle
    /// delay. Exhausting `max_wait` fails with
    /// [`IssuanceError::PropagationTimeout`].
    pub async fn wait_for_txt(
        &self,
        provider: &Arc<dyn DnsProvider>,
        domain: &str,
        record_name: &str,
        value: &str,
    ) -> IssuanceResult<()> {
        let deadline = Instant::now() + self.config.max_wait;
        let resolver = match self.config.strategy {
            PropagationStrategy::PublicDns => Some(public_resolver()),
            PropagationStrategy::ProviderApi => None,
        };

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let observed = match &resolver {
                Some(resolver) => check_public_dns(resolver, record_name, value).await,
                None => check_provider(provider, domain, record_name, value).await,
            };

            if observed {
                log::info!(
                    "[propagation] TXT {record_name} observed after {attempt} attempt(s), settling"
                );
                tokio::time::sleep(self.config.settle_delay).await;
                return Ok(());
            }

            if Instant::now() + self.config.interval > deadline {
                return Err(IssuanceError::PropagationTimeout {
                    record_name: record_name.to_string(),
                    waited_secs: self.config.max_wait.as_secs(),
                });
            }

            log::debug!("[propagation] TXT {record_name} not visible yet (attempt {attempt})");
            tokio::time::sleep(self.config.interval).await;
        }
    }
}

/// Resolver against public recursors, with caching off so every poll is a
/// fresh query.
fn public_resolver() -> TokioResolver {
    let config = ResolverConfig::from_parts(None, vec![], NameServerConfigGroup::google());
    let mut opts = ResolverOpts::default();
    opts.cache_size = 0;
    TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
        .with_options(opts)
        .build()
}

async fn check_public_dns(resolver: &TokioResolver, record_name: &str, value: &str) -> bool {
    match resolver.txt_lookup(format!("{record_name}.")).await {
        Ok(lookup) => lookup.iter().any(|txt| txt.to_string() == value),
        Err(e) => {
            log::debug!("[propagation] Public DNS lookup for {record_name} failed: {e}");
            false
        }
    }
}

async fn check_provider(
    provider: &Arc<dyn DnsProvider>,
    domain: &str,
    record_name: &str,
    value: &str,
) -> bool {
    let zone = split_zone(domain);
    let owner = zone_relative_owner(record_name, &zone);
    match provider.list_txt_records(domain).await {
        Ok(records) => records.iter().any(|r| r.name == owner && r.value == value),
        Err(e) => {
            log::warn!("[propagation] Listing records on {} failed: {e}", provider.id());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockDnsProvider;

    fn fast_config() -> PropagationConfig {
        PropagationConfig {
            interval: Duration::from_millis(10),
            max_wait: Duration::from_millis(200),
            settle_delay: Duration::ZERO,
            strategy: PropagationStrategy::ProviderApi,
        }
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = PropagationConfig::default();
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.max_wait, Duration::from_secs(120));
        assert_eq!(config.settle_delay, Duration::from_secs(10));
        assert_eq!(config.strategy, PropagationStrategy::PublicDns);
    }

    #[tokio::test]
    async fn provider_api_strategy_sees_published_record() {
        let provider = Arc::new(MockDnsProvider::new());
        provider
            .add_txt_record("www.example.com", "_acme-challenge.www.example.com", "digest")
            .await
            .unwrap();

        let waiter = PropagationWaiter::new(fast_config());
        let provider: Arc<dyn DnsProvider> = provider;
        waiter
            .wait_for_txt(
                &provider,
                "www.example.com",
                "_acme-challenge.www.example.com",
                "digest",
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_record_times_out() {
        let provider: Arc<dyn DnsProvider> = Arc::new(MockDnsProvider::never_propagating());
        let waiter = PropagationWaiter::new(fast_config());
        let err = waiter
            .wait_for_txt(
                &provider,
                "example.com",
                "_acme-challenge.example.com",
                "digest",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, IssuanceError::PropagationTimeout { .. }));
    }

    #[tokio::test]
    async fn value_mismatch_does_not_count_as_propagated() {
        let provider = Arc::new(MockDnsProvider::new());
        provider
            .add_txt_record("example.com", "_acme-challenge.example.com", "other-value")
            .await
            .unwrap();

        let waiter = PropagationWaiter::new(fast_config());
        let provider: Arc<dyn DnsProvider> = provider;
        let err = waiter
            .wait_for_txt(
                &provider,
                "example.com",
                "_acme-challenge.example.com",
                "expected-value",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, IssuanceError::PropagationTimeout { .. }));
    }
}
