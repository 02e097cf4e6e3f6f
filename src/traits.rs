use async_trait::async_trait;

use crate::error::{BatchError, BatchResult, ProviderError, Result};
use crate::reconcile::{find_delete_target, find_set_target, MatchOutcome};
use crate::types::{ProviderMetadata, Record};

/// Raw API error (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format varies per provider).
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context available when mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name, for `RecordExists`-style errors.
    pub record_name: Option<String>,
    /// Record ID, for `RecordNotFound`-style errors.
    pub record_id: Option<String>,
    /// Zone name, for `ZoneNotFound`-style errors.
    pub zone: Option<String>,
}

/// Error-mapping seam (internal). Each adapter implements this to translate
/// its API's raw error codes into the unified [`ProviderError`] taxonomy.
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in mapped errors.
    fn provider_name(&self) -> &'static str;

    /// Maps a raw API error into the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unrecognized error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// The common contract every DNS provider adapter implements.
///
/// Implementors supply [`get_records`](Self::get_records) plus the three
/// per-record primitives; the batch verbs come for free with the contract
/// semantics below, and an adapter only overrides them when its API has a
/// native batch call with the same semantics.
///
/// # Zones and names
///
/// Every method takes `zone` as the zone's domain name, with or without the
/// trailing dot (`"example.com"` and `"example.com."` are equivalent).
/// Record names are relative to the zone; `""` or `"@"` is the apex.
///
/// # Batch semantics
///
/// The batch verbs process inputs strictly in order and stop at the first
/// failure. The returned [`BatchError`] carries every record committed before
/// the failure; nothing is rolled back.
///
/// # Cancellation
///
/// All methods are plain futures: dropping one aborts the in-flight HTTP
/// request. An operation the remote API already accepted may still take
/// effect, so after a cancellation the zone should be re-read, not assumed.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Provider identifier (`"alidns"`, `"cloudflare"`, ...).
    fn id(&self) -> &'static str;

    /// Type-level metadata: display name, description and the credential
    /// fields required to construct this provider.
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Verifies that the configured credentials are accepted by the API.
    ///
    /// Returns `Ok(true)` when a cheap authenticated call succeeds. Transport
    /// failures surface as errors; `Ok(false)` is reserved for APIs that
    /// report "valid request, bad key" without an error status.
    async fn validate_credentials(&self) -> Result<bool>;

    /// Returns all records in the zone.
    ///
    /// Paginates internally until the zone is exhausted. Every returned
    /// record has a non-empty [`id`](Record::id).
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>>;

    /// Creates `record` in the zone and returns it with its assigned ID.
    /// Fails with [`ProviderError::RecordExists`] on an exact duplicate where
    /// the API reports one.
    async fn create_record(&self, zone: &str, record: &Record) -> Result<Record>;

    /// Overwrites the live record identified by `record.id` with `record`'s
    /// data. The ID must be non-empty; fails with
    /// [`ProviderError::RecordNotFound`] when no such record exists.
    async fn update_record(&self, zone: &str, record: &Record) -> Result<Record>;

    /// Deletes the live record identified by `record.id`. The ID must be
    /// non-empty.
    async fn delete_record(&self, zone: &str, record: &Record) -> Result<()>;

    /// Creates all `records` in the zone, strictly additively.
    ///
    /// Inputs must not carry an ID (an append never updates); a pre-set ID
    /// fails that input with [`ProviderError::InvalidParameter`]. On success
    /// the returned records are the inputs in order, each populated with its
    /// assigned ID.
    async fn append_records(&self, zone: &str, records: &[Record]) -> BatchResult {
        let mut committed = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.has_id() {
                let error = ProviderError::InvalidParameter {
                    provider: self.id().to_string(),
                    param: "id".to_string(),
                    detail: format!(
                        "append must not carry a record ID (got '{}'); use set_records to update",
                        record.id
                    ),
                };
                return Err(BatchError::new(committed, i, error));
            }
            match self.create_record(zone, record).await {
                Ok(created) => committed.push(created),
                Err(e) => return Err(BatchError::new(committed, i, e)),
            }
        }
        Ok(committed)
    }

    /// Ensures each input exists in the zone with exactly its data — a
    /// targeted upsert, never a wholesale replace.
    ///
    /// Target selection per input: a non-empty ID is authoritative (no such
    /// ID fails with [`ProviderError::RecordNotFound`], never a silent
    /// create). Without an ID, the `(name, type)` pair selects the target:
    /// zero live matches creates, one updates, several fail with
    /// [`ProviderError::AmbiguousMatch`]. Records this verb neither matched
    /// nor created are left untouched.
    ///
    /// The zone is read once up front; earlier inputs' effects are tracked
    /// locally so later inputs in the same batch see them.
    async fn set_records(&self, zone: &str, records: &[Record]) -> BatchResult {
        let mut live = match self.get_records(zone).await {
            Ok(live) => live,
            Err(e) => return Err(BatchError::new(Vec::new(), 0, e)),
        };

        let mut committed = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            match find_set_target(&live, record) {
                MatchOutcome::Zero if record.has_id() => {
                    let error = ProviderError::RecordNotFound {
                        provider: self.id().to_string(),
                        record_id: record.id.clone(),
                        raw_message: None,
                    };
                    return Err(BatchError::new(committed, i, error));
                }
                MatchOutcome::Zero => match self.create_record(zone, record).await {
                    Ok(created) => {
                        live.push(created.clone());
                        committed.push(created);
                    }
                    Err(e) => return Err(BatchError::new(committed, i, e)),
                },
                MatchOutcome::One(target) => {
                    let mut desired = record.clone();
                    desired.id = live[target].id.clone();
                    match self.update_record(zone, &desired).await {
                        Ok(updated) => {
                            live[target] = updated.clone();
                            committed.push(updated);
                        }
                        Err(e) => return Err(BatchError::new(committed, i, e)),
                    }
                }
                MatchOutcome::Many(matched) => {
                    let error = ProviderError::AmbiguousMatch {
                        provider: self.id().to_string(),
                        name: record.name.clone(),
                        record_type: Some(record.record_type.to_string()),
                        matched,
                    };
                    return Err(BatchError::new(committed, i, error));
                }
            }
        }
        Ok(committed)
    }

    /// Deletes each input's target record from the zone.
    ///
    /// Target selection per input: a non-empty ID is authoritative; without
    /// one, `(name, type)` selects candidates and a non-empty value narrows
    /// them. A target that does not exist is skipped (delete is idempotent)
    /// and the batch continues; several candidates fail with
    /// [`ProviderError::AmbiguousMatch`].
    ///
    /// On success the returned records are those actually deleted, with
    /// their live IDs; already-absent inputs do not appear.
    async fn delete_records(&self, zone: &str, records: &[Record]) -> BatchResult {
        let mut live = match self.get_records(zone).await {
            Ok(live) => live,
            Err(e) => return Err(BatchError::new(Vec::new(), 0, e)),
        };

        let mut committed = Vec::new();
        for (i, record) in records.iter().enumerate() {
            match find_delete_target(&live, record) {
                MatchOutcome::Zero => {
                    log::debug!(
                        "[{}] delete: no live record matches '{}' {} in zone '{}', skipping",
                        self.id(),
                        record.name,
                        record.record_type,
                        zone
                    );
                }
                MatchOutcome::One(target) => {
                    let victim = live[target].clone();
                    match self.delete_record(zone, &victim).await {
                        Ok(()) => {
                            live.remove(target);
                            committed.push(victim);
                        }
                        Err(e) => return Err(BatchError::new(committed, i, e)),
                    }
                }
                MatchOutcome::Many(matched) => {
                    let error = ProviderError::AmbiguousMatch {
                        provider: self.id().to_string(),
                        name: record.name.clone(),
                        record_type: Some(record.record_type.to_string()),
                        matched,
                    };
                    return Err(BatchError::new(committed, i, error));
                }
            }
        }
        Ok(committed)
    }
}
