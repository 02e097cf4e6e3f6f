use serde::{Deserialize, Serialize};

use crate::types::Record;

/// Unified error type for all provider operations.
///
/// Each variant includes a `provider` field identifying which adapter produced
/// the error, plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// # Retryable Errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are transient. The built-in HTTP
/// plumbing retries them with exponential backoff for idempotent (GET-style)
/// calls only; mutating calls are never retried internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, unexpected 5xx, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details, including the HTTP status and body where available.
        detail: String,
    },

    /// The HTTP request timed out.
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
        /// Suggested wait in seconds before retrying, if the API provided one.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provided credentials are invalid or expired. Fatal; never retried.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The requested zone has no matching provider-side entry.
    ZoneNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone that was not found.
        zone: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The zone is locked or disabled and cannot be modified.
    ZoneLocked {
        /// Provider that produced the error.
        provider: String,
        /// Zone that is locked.
        zone: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified record was not found.
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// ID of the record that was not found.
        record_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A record with the same name/type/value already exists.
    RecordExists {
        /// Provider that produced the error.
        provider: String,
        /// Name of the conflicting record.
        record_name: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A name-based lookup during Set/Delete matched more than one live
    /// record — an ambiguous target, never resolved by an arbitrary pick.
    AmbiguousMatch {
        /// Provider that produced the error.
        provider: String,
        /// Record name that was being matched.
        name: String,
        /// Record type that was being matched, if one narrowed the lookup.
        record_type: Option<String>,
        /// How many live records matched.
        matched: usize,
    },

    /// A request parameter is invalid (bad TTL, malformed value, a pre-set
    /// record ID passed to an append, ...).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The account's resource quota has been exceeded. Not transient.
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body or query.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether this error represents expected behavior (bad caller input,
    /// absent resources) rather than an operational fault, for log routing.
    ///
    /// `true` warrants `warn` level, `false` warrants `error` level.
    /// **Update this when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::ZoneLocked { .. }
                | Self::RecordNotFound { .. }
                | Self::RecordExists { .. }
                | Self::AmbiguousMatch { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
        )
    }

    /// Whether the error is transient and worth retrying an idempotent call
    /// for.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
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
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::ZoneNotFound {
                provider,
                zone,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Zone '{zone}' not found")
                }
            }
            Self::ZoneLocked {
                provider,
                zone,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Zone '{zone}' is locked: {msg}")
                } else {
                    write!(f, "[{provider}] Zone '{zone}' is locked")
                }
            }
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_id}' not found")
            }
            Self::RecordExists {
                provider,
                record_name,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_name}' already exists")
            }
            Self::AmbiguousMatch {
                provider,
                name,
                record_type,
                matched,
            } => {
                if let Some(rt) = record_type {
                    write!(
                        f,
                        "[{provider}] Ambiguous target: {matched} records match name '{name}' type {rt}"
                    )
                } else {
                    write!(
                        f,
                        "[{provider}] Ambiguous target: {matched} records match name '{name}'"
                    )
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

// ============ Batch Errors ============

/// Error from a batch verb (`append_records`, `set_records`,
/// `delete_records`).
///
/// Batch verbs process inputs in order and stop at the first failure. This
/// error always carries everything that was committed before the failure, so
/// callers never lose track of partially-applied work; nothing is rolled
/// back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    /// Records committed (created/updated/deleted) before the failure, in
    /// input order.
    pub committed: Vec<Record>,
    /// Index of the input record that failed. Inputs after this index were
    /// not attempted.
    pub failed_index: usize,
    /// The underlying provider error.
    pub error: ProviderError,
}

impl BatchError {
    pub(crate) fn new(committed: Vec<Record>, failed_index: usize, error: ProviderError) -> Self {
        Self {
            committed,
            failed_index,
            error,
        }
    }
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "batch failed at input {} after {} committed: {}",
            self.failed_index,
            self.committed.len(),
            self.error
        )
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of a batch verb: the full per-input result list on success, or a
/// [`BatchError`] carrying the partial result.
pub type BatchResult = std::result::Result<Vec<Record>, BatchError>;
