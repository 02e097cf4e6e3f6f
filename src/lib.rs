//! # dns-provider-bridge
//!
//! A provider-neutral DNS record management library: one small record model,
//! four verbs, and interchangeable backends for multiple cloud platforms.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//! | [AliCloud DNS](https://www.aliyun.com/product/dns) | `alidns` | HMAC-SHA1 (classic) |
//! | [Huawei Cloud DNS](https://www.huaweicloud.com/product/dns.html) | `huaweicloud` | AK/SK Signing |
//! | In-memory | `memory` | none |
//!
//! ## Feature Flags
//!
//! ### Provider Selection
//!
//! - **`all-providers`** *(default)* — Enable all providers listed above.
//! - **`alidns`**, **`cloudflare`**, **`huaweicloud`**, **`memory`** — Enable
//!   a single provider.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## The Contract
//!
//! Every backend implements [`RecordProvider`], which exposes four verbs over
//! a zone:
//!
//! - [`get_records`](RecordProvider::get_records) — list all records.
//! - [`append_records`](RecordProvider::append_records) — create records,
//!   never touching existing ones.
//! - [`set_records`](RecordProvider::set_records) — targeted upsert: update
//!   the one record matched by ID (or by name and type), create when nothing
//!   matches, fail when several match.
//! - [`delete_records`](RecordProvider::delete_records) — delete matched
//!   records; inputs that match nothing are skipped.
//!
//! The batch verbs stop at the first failure and report the records already
//! committed alongside the error, so callers can reconcile partial progress.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dns_provider_bridge::{
//!     create_provider, ProviderCredentials, Record, RecordProvider, RecordType,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Cloudflare {
//!         api_token: "your-token".to_string(),
//!     })?;
//!
//!     provider.validate_credentials().await?;
//!
//!     let records = provider.get_records("example.com").await?;
//!     for record in &records {
//!         println!("{} {} -> {}", record.name, record.record_type, record.value);
//!     }
//!
//!     let created = provider
//!         .append_records(
//!             "example.com",
//!             &[Record::new(RecordType::Txt, "_acme-challenge", "token-value")
//!                 .with_ttl(300)],
//!         )
//!         .await
//!         .map_err(|e| e.error)?;
//!     println!("created {} records", created.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Single-record paths return [`Result<T, ProviderError>`](ProviderError); the
//! batch verbs return [`BatchResult`], whose error side ([`BatchError`])
//! carries the committed prefix. Structured variants cover the common failure
//! modes:
//!
//! - [`ProviderError::InvalidCredentials`] — authentication failed
//! - [`ProviderError::ZoneNotFound`] — the zone does not exist
//! - [`ProviderError::AmbiguousMatch`] — a set/delete input matched several records
//! - [`ProviderError::RateLimited`] — API rate limit exceeded (retryable)
//! - [`ProviderError::NetworkError`] — network connectivity issue (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are
//! automatically retried with exponential backoff on read-style calls. See
//! [`ProviderError`] for the full list.

mod error;
mod factory;
mod http_client;
mod providers;
mod reconcile;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{BatchError, BatchResult, ProviderError, Result};

// Re-export factory functions
pub use factory::{all_provider_metadata, create_provider};

// Re-export core trait only (internal traits are not exported)
pub use traits::RecordProvider;

// Re-export types
pub use types::{
    CredentialValidationError, FieldType, ProviderCredentialField, ProviderCredentials,
    ProviderMetadata, ProviderType, Record, RecordType,
};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "alidns")]
pub use providers::AlidnsProvider;

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;

#[cfg(feature = "huaweicloud")]
pub use providers::HuaweicloudProvider;

#[cfg(feature = "memory")]
pub use providers::MemoryProvider;
