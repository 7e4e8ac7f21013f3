use serde::{Deserialize, Serialize};

/// Unified error type for all DNS provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced
/// the error. The distinction the caller relies on:
///
/// - [`ApiError`](Self::ApiError) — the backend accepted the request and
///   rejected the operation; carries the backend's own code and message.
/// - [`InvalidCredentials`](Self::InvalidCredentials) — the backend rejected
///   the authentication itself (bad key, bad signature, expired token).
/// - [`NetworkError`](Self::NetworkError) / [`Timeout`](Self::Timeout) — the
///   request never produced a backend verdict.
///
/// # Retryable Errors
///
/// `NetworkError`, `Timeout` and `RateLimited` are transient; the built-in
/// HTTP layer retries them with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, etc.). Transient; automatically retried.
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out. Transient; automatically retried.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if the API said.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provided credentials are invalid or expired.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The backend rejected the operation with a structured error payload.
    ApiError {
        /// Provider that produced the error.
        provider: String,
        /// Backend error code, if the API supplied one.
        #[serde(rename = "raw_code")]
        code: Option<String>,
        /// Backend error message, verbatim.
        message: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body or query string.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ProviderError {
    /// Which provider produced this error.
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. } => provider,
        }
    }

    /// Whether this is an authentication failure (as opposed to an operation
    /// the backend rejected for other reasons, or a transport problem).
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials { .. })
    }

    /// Whether this is expected behavior (bad input, bad credentials) for log
    /// level classification: `warn` when `true`, `error` when `false`.
    ///
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::ApiError { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::ApiError {
                provider,
                code,
                message,
            } => {
                if let Some(code) = code {
                    write!(f, "[{provider}] API error {code}: {message}")
                } else {
                    write!(f, "[{provider}] API error: {message}")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
