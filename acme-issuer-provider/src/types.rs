use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// `DNSPod` legacy API. Requires feature `dnspod`.
    #[cfg(feature = "dnspod")]
    Dnspod,
    /// Aliyun DNS. Requires feature `aliyun`.
    #[cfg(feature = "aliyun")]
    Aliyun,
    /// Cloudflare DNS. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    Cloudflare,
    /// AWS Route 53. Requires feature `route53`.
    #[cfg(feature = "route53")]
    Route53,
    /// Baidu Cloud DNS. Requires feature `baidu`.
    #[cfg(feature = "baidu")]
    Baidu,
    /// Huawei Cloud DNS. Requires feature `huawei`.
    #[cfg(feature = "huawei")]
    Huawei,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "dnspod")]
            Self::Dnspod => write!(f, "dnspod"),
            #[cfg(feature = "aliyun")]
            Self::Aliyun => write!(f, "aliyun"),
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare => write!(f, "cloudflare"),
            #[cfg(feature = "route53")]
            Self::Route53 => write!(f, "route53"),
            #[cfg(feature = "baidu")]
            Self::Baidu => write!(f, "baidu"),
            #[cfg(feature = "huawei")]
            Self::Huawei => write!(f, "huawei"),
        }
    }
}

// ============ Record Types ============

/// A TXT record as reported by a provider's record listing.
///
/// `name` is the zone-relative owner name (`"@"` for the zone apex,
/// `"_acme-challenge"` for a challenge record on the apex domain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxtRecord {
    /// Zone-relative owner name.
    pub name: String,
    /// Text value of the record.
    pub value: String,
    /// Time to live in seconds, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Handle to a TXT record created by [`add_txt_record`](crate::DnsProvider::add_txt_record).
///
/// Backends that return a record identifier at creation time delete by `id`.
/// Backends that do not (Route 53 change batches, Baidu) delete by locating
/// the record set whose name and value match this handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHandle {
    /// Backend record identifier, when the create call returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full record name the provider was asked to create
    /// (e.g. `_acme-challenge.www.example.com`).
    pub name: String,
    /// Text value of the record.
    pub value: String,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing, empty, or malformed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for all supported DNS providers.
///
/// Each variant holds the authentication fields required by that provider.
/// Pass this to [`create_provider`](crate::create_provider) to instantiate
/// a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// `DNSPod` legacy `login_token` credentials. Requires feature `dnspod`.
    #[cfg(feature = "dnspod")]
    #[serde(rename = "dnspod")]
    Dnspod {
        /// `DNSPod` API ID (numeric, the first half of the login token).
        api_id: String,
        /// `DNSPod` API token (the second half of the login token).
        api_token: String,
    },

    /// Aliyun DNS credentials. Requires feature `aliyun`.
    #[cfg(feature = "aliyun")]
    #[serde(rename = "aliyun")]
    Aliyun {
        /// Aliyun Access Key ID.
        access_key_id: String,
        /// Aliyun Access Key Secret.
        access_key_secret: String,
    },

    /// Cloudflare credentials. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Cloudflare API token with DNS edit permission.
        api_token: String,
        /// Zone identifier of the target zone.
        zone_id: String,
    },

    /// AWS Route 53 credentials. Requires feature `route53`.
    #[cfg(feature = "route53")]
    #[serde(rename = "route53")]
    Route53 {
        /// AWS Access Key ID.
        access_key_id: String,
        /// AWS Secret Access Key.
        secret_access_key: String,
        /// AWS region used in the credential scope.
        region: String,
        /// Hosted zone identifier of the target zone.
        hosted_zone_id: String,
    },

    /// Baidu Cloud DNS credentials. Requires feature `baidu`.
    #[cfg(feature = "baidu")]
    #[serde(rename = "baidu")]
    Baidu {
        /// Baidu Cloud Access Key ID.
        access_key_id: String,
        /// Baidu Cloud Secret Access Key.
        secret_access_key: String,
        /// Baidu Cloud region (e.g. `bj`).
        region: String,
    },

    /// Huawei Cloud DNS credentials. Requires feature `huawei`.
    #[cfg(feature = "huawei")]
    #[serde(rename = "huawei")]
    Huawei {
        /// Huawei Cloud Access Key ID.
        access_key_id: String,
        /// Huawei Cloud Secret Access Key.
        secret_access_key: String,
        /// Region of the DNS endpoint (e.g. `cn-north-4`).
        region: String,
        /// Project ID used to scope the IAM session token.
        project_id: String,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a flat `HashMap`, validating required fields.
    ///
    /// This is the shape external callers supply credential bundles in.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or
    /// empty.
    pub fn from_map(
        provider: &ProviderType,
        map: &std::collections::HashMap<String, String>,
    ) -> std::result::Result<Self, CredentialValidationError> {
        let field = |key: &str, label: &str| Self::get_required_field(provider, map, key, label);
        match provider {
            #[cfg(feature = "dnspod")]
            ProviderType::Dnspod => Ok(Self::Dnspod {
                api_id: field("apiId", "API ID")?,
                api_token: field("apiToken", "API Token")?,
            }),
            #[cfg(feature = "aliyun")]
            ProviderType::Aliyun => Ok(Self::Aliyun {
                access_key_id: field("accessKeyId", "Access Key ID")?,
                access_key_secret: field("accessKeySecret", "Access Key Secret")?,
            }),
            #[cfg(feature = "cloudflare")]
            ProviderType::Cloudflare => Ok(Self::Cloudflare {
                api_token: field("apiToken", "API Token")?,
                zone_id: field("zoneId", "Zone ID")?,
            }),
            #[cfg(feature = "route53")]
            ProviderType::Route53 => Ok(Self::Route53 {
                access_key_id: field("accessKeyId", "Access Key ID")?,
                secret_access_key: field("secretAccessKey", "Secret Access Key")?,
                region: field("region", "Region")?,
                hosted_zone_id: field("hostedZoneId", "Hosted Zone ID")?,
            }),
            #[cfg(feature = "baidu")]
            ProviderType::Baidu => Ok(Self::Baidu {
                access_key_id: field("accessKeyId", "Access Key ID")?,
                secret_access_key: field("secretAccessKey", "Secret Access Key")?,
                region: field("region", "Region")?,
            }),
            #[cfg(feature = "huawei")]
            ProviderType::Huawei => Ok(Self::Huawei {
                access_key_id: field("accessKeyId", "Access Key ID")?,
                secret_access_key: field("secretAccessKey", "Secret Access Key")?,
                region: field("region", "Region")?,
                project_id: field("projectId", "Project ID")?,
            }),
        }
    }

    /// Obtain a required field from the map, verifying it is non-empty.
    fn get_required_field(
        provider: &ProviderType,
        map: &std::collections::HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> std::result::Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "dnspod")]
            Self::Dnspod { .. } => ProviderType::Dnspod,
            #[cfg(feature = "aliyun")]
            Self::Aliyun { .. } => ProviderType::Aliyun,
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => ProviderType::Cloudflare,
            #[cfg(feature = "route53")]
            Self::Route53 { .. } => ProviderType::Route53,
            #[cfg(feature = "baidu")]
            Self::Baidu { .. } => ProviderType::Baidu,
            #[cfg(feature = "huawei")]
            Self::Huawei { .. } => ProviderType::Huawei,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn credentials_dnspod_from_map() {
        let map: HashMap<String, String> = [
            ("apiId".to_string(), "12345".to_string()),
            ("apiToken".to_string(), "tok".to_string()),
        ]
        .into();
        let cred = ProviderCredentials::from_map(&ProviderType::Dnspod, &map)
            .expect("valid dnspod credentials");
        assert_eq!(cred.provider_type(), ProviderType::Dnspod);
    }

    #[test]
    fn credentials_cloudflare_requires_zone_id() {
        let map: HashMap<String, String> =
            [("apiToken".to_string(), "my-token".to_string())].into();
        let res = ProviderCredentials::from_map(&ProviderType::Cloudflare, &map);
        assert!(
            matches!(&res, Err(CredentialValidationError::MissingField { field, .. }) if field == "zoneId"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_huawei_from_map() {
        let map: HashMap<String, String> = [
            ("accessKeyId".to_string(), "ak".to_string()),
            ("secretAccessKey".to_string(), "sk".to_string()),
            ("region".to_string(), "cn-north-4".to_string()),
            ("projectId".to_string(), "proj-1".to_string()),
        ]
        .into();
        let cred = ProviderCredentials::from_map(&ProviderType::Huawei, &map)
            .expect("valid huawei credentials");
        assert_eq!(cred.provider_type(), ProviderType::Huawei);
    }

    #[test]
    fn credentials_route53_from_map() {
        let map: HashMap<String, String> = [
            ("accessKeyId".to_string(), "AKIA".to_string()),
            ("secretAccessKey".to_string(), "secret".to_string()),
            ("region".to_string(), "us-east-1".to_string()),
            ("hostedZoneId".to_string(), "Z123".to_string()),
        ]
        .into();
        let cred = ProviderCredentials::from_map(&ProviderType::Route53, &map)
            .expect("valid route53 credentials");
        assert_eq!(cred.provider_type(), ProviderType::Route53);
    }

    #[test]
    fn credentials_empty_field_rejected() {
        let map: HashMap<String, String> = [
            ("accessKeyId".to_string(), "  ".to_string()),
            ("accessKeySecret".to_string(), "s".to_string()),
        ]
        .into();
        let res = ProviderCredentials::from_map(&ProviderType::Aliyun, &map);
        assert!(
            matches!(&res, Err(CredentialValidationError::EmptyField { field, .. }) if field == "accessKeyId"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_serde_tagged() {
        let cred = ProviderCredentials::Cloudflare {
            api_token: "t".into(),
            zone_id: "z".into(),
        };
        let json = serde_json::to_string(&cred).unwrap();
        assert!(json.contains("\"provider\":\"cloudflare\""));
        assert!(json.contains("\"zone_id\":\"z\""));
    }

    #[test]
    fn record_handle_serde_skips_missing_id() {
        let handle = RecordHandle {
            id: None,
            name: "_acme-challenge.example.com".into(),
            value: "digest".into(),
        };
        let json = serde_json::to_string(&handle).unwrap();
        assert!(!json.contains("\"id\""));
    }
}
