//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "aliyun")]
mod aliyun;
#[cfg(feature = "baidu")]
mod baidu;
#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "dnspod")]
mod dnspod;
#[cfg(feature = "huawei")]
mod huawei;
#[cfg(feature = "route53")]
mod route53;

#[cfg(feature = "aliyun")]
pub use aliyun::AliyunProvider;
#[cfg(feature = "baidu")]
pub use baidu::BaiduProvider;
#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareProvider;
#[cfg(feature = "dnspod")]
pub use dnspod::DnspodProvider;
#[cfg(feature = "huawei")]
pub use huawei::HuaweiProvider;
#[cfg(feature = "route53")]
pub use route53::Route53Provider;
