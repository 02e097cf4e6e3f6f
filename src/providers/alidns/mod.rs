//! Alibaba Cloud DNS (AliDNS) adapter.

mod error;
mod http;
mod provider;
mod sign;
mod types;

use crate::providers::common::LazyHttpClient;

pub(crate) use types::{
    AddDomainRecordResponse, DeleteDomainRecordResponse, DescribeDomainRecordsResponse,
    UpdateDomainRecordResponse,
};

pub(crate) const ALIDNS_HOST: &str = "alidns.aliyuncs.com";
pub(crate) const ALIDNS_API_VERSION: &str = "2015-01-09";
/// AliDNS caps `DescribeDomainRecords` at 500 records per page.
pub(crate) const MAX_PAGE_SIZE: u32 = 500;

/// Alibaba Cloud DNS provider.
///
/// Talks the RPC-style query API: every call is a GET against
/// `alidns.aliyuncs.com` with all parameters in the query string, signed
/// with the classic HMAC-SHA1 signature scheme.
///
/// # Construction
///
/// ```rust,no_run
/// use dns_provider_bridge::AlidnsProvider;
///
/// let provider = AlidnsProvider::new(
///     "your-access-key-id".to_string(),
///     "your-access-key-secret".to_string(),
/// );
/// ```
pub struct AlidnsProvider {
    pub(crate) client: LazyHttpClient,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`AlidnsProvider`] with configurable retry behavior.
pub struct AlidnsProviderBuilder {
    access_key_id: String,
    access_key_secret: String,
    max_retries: u32,
}

impl AlidnsProviderBuilder {
    fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self {
            access_key_id,
            access_key_secret,
            max_retries: 2,
        }
    }

    /// Set the maximum number of automatic retries for transient errors
    /// (default: 2). Only read-style calls retry.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`AlidnsProvider`] instance.
    pub fn build(self) -> AlidnsProvider {
        AlidnsProvider {
            client: LazyHttpClient::new(),
            access_key_id: self.access_key_id,
            access_key_secret: self.access_key_secret,
            max_retries: self.max_retries,
        }
    }
}

impl AlidnsProvider {
    /// Creates a new AliDNS provider with default settings (2 retries).
    pub fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self::builder(access_key_id, access_key_secret).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(access_key_id: String, access_key_secret: String) -> AlidnsProviderBuilder {
        AlidnsProviderBuilder::new(access_key_id, access_key_secret)
    }
}
