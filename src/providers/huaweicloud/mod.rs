//! Huawei Cloud DNS adapter.
//!
//! The API models a name/type pair as a single *record set* carrying several
//! values. This adapter flattens each value to its own [`Record`] with a
//! synthesized `"{recordset_id}:{index}"` ID, so the contract's one record
//! equals one value everywhere.
//!
//! [`Record`]: crate::types::Record

mod error;
mod http;
mod provider;
mod sign;
/// Huawei Cloud API-specific request/response types.
pub(crate) mod types;

use crate::providers::common::{LazyHttpClient, ZoneCache};

/// Huawei Cloud DNS API host.
pub(crate) const HUAWEICLOUD_DNS_HOST: &str = "dns.myhuaweicloud.com";
/// Listing APIs cap at 500 items per page.
pub(crate) const MAX_PAGE_SIZE: u32 = 500;

/// Huawei Cloud DNS provider.
///
/// Authenticates via AK/SK request signing (SDK-HMAC-SHA256).
///
/// # Construction
///
/// ```rust,no_run
/// use dns_provider_bridge::HuaweicloudProvider;
///
/// let provider = HuaweicloudProvider::new(
///     "your-access-key-id".to_string(),
///     "your-secret-access-key".to_string(),
/// );
/// ```
pub struct HuaweicloudProvider {
    pub(crate) client: LazyHttpClient,
    pub(crate) access_key_id: String,
    pub(crate) secret_access_key: String,
    pub(crate) max_retries: u32,
    pub(crate) zone_cache: ZoneCache,
}

/// Builder for [`HuaweicloudProvider`] with configurable retry behavior.
pub struct HuaweicloudProviderBuilder {
    access_key_id: String,
    secret_access_key: String,
    max_retries: u32,
}

impl HuaweicloudProviderBuilder {
    fn new(access_key_id: String, secret_access_key: String) -> Self {
        Self {
            access_key_id,
            secret_access_key,
            max_retries: 2,
        }
    }

    /// Set the maximum number of automatic retries for transient errors
    /// (default: 2). Only read-style calls retry.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`HuaweicloudProvider`] instance.
    pub fn build(self) -> HuaweicloudProvider {
        HuaweicloudProvider {
            client: LazyHttpClient::new(),
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            max_retries: self.max_retries,
            zone_cache: ZoneCache::new(),
        }
    }
}

impl HuaweicloudProvider {
    /// Creates a new Huawei Cloud provider with default settings (2 retries).
    pub fn new(access_key_id: String, secret_access_key: String) -> Self {
        Self::builder(access_key_id, secret_access_key).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(access_key_id: String, secret_access_key: String) -> HuaweicloudProviderBuilder {
        HuaweicloudProviderBuilder::new(access_key_id, secret_access_key)
    }
}
