//! # acme-issuer-provider
//!
//! A DNS provider abstraction for ACME DNS-01 challenge automation: create,
//! delete and list the `_acme-challenge` TXT records an ACME order needs,
//! uniformly across multiple cloud DNS platforms.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [DNSPod](https://www.dnspod.cn/) | `dnspod` | login token (legacy API) |
//! | [Aliyun DNS](https://www.aliyun.com/product/dns) | `aliyun` | HMAC-SHA1 query signing |
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//! | [AWS Route 53](https://aws.amazon.com/route53/) | `route53` | HMAC-SHA256 signing |
//! | [Baidu Cloud DNS](https://cloud.baidu.com/product/dns.html) | `baidu` | bce-auth-v1 signing |
//! | [Huawei Cloud DNS](https://www.huaweicloud.com/product/dns.html) | `huawei` | IAM token (AK/SK) |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)* — Enable all providers listed above, or
//!   pick individual provider features.
//! - **`native-tls`** *(default)* / **`rustls`** — TLS backend selection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use acme_issuer_provider::{create_http_client, create_provider, ProviderCredentials};
//!
//! # async fn example() -> acme_issuer_provider::Result<()> {
//! let provider = create_provider(
//!     ProviderCredentials::Cloudflare {
//!         api_token: "your-token".to_string(),
//!         zone_id: "your-zone-id".to_string(),
//!     },
//!     create_http_client(),
//! );
//!
//! let handle = provider
//!     .add_txt_record("www.example.com", "_acme-challenge.www.example.com", "digest")
//!     .await?;
//! // ... wait for propagation, complete the challenge ...
//! provider.remove_txt_record("www.example.com", &handle).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). The
//! variants callers branch on:
//!
//! - [`ProviderError::InvalidCredentials`] — the backend rejected the
//!   authentication itself
//! - [`ProviderError::ApiError`] — the backend rejected the operation
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] /
//!   [`ProviderError::RateLimited`] — transient; automatically retried with
//!   exponential backoff

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{
    CredentialValidationError, ProviderCredentials, ProviderType, RecordHandle, TxtRecord,
};

// Re-export the default HTTP client constructor and zone-name helpers
pub use providers::common::{create_http_client, split_zone, zone_relative_owner};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "dnspod")]
pub use providers::DnspodProvider;

#[cfg(feature = "aliyun")]
pub use providers::AliyunProvider;

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;

#[cfg(feature = "route53")]
pub use providers::Route53Provider;

#[cfg(feature = "baidu")]
pub use providers::BaiduProvider;

#[cfg(feature = "huawei")]
pub use providers::HuaweiProvider;
