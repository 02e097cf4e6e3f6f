//! Cloudflare DNS adapter.

mod error;
mod http;
mod provider;
mod types;

use crate::providers::common::{LazyHttpClient, ZoneCache};

pub(crate) use types::{CloudflareDnsRecord, CloudflareRecordBody, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Zones listing caps at 50 per page.
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// DNS records listing caps at 100 per page.
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare DNS provider.
///
/// Authenticates with a scoped API token (`Zone.DNS` edit permission).
/// Cloudflare keys everything by an opaque zone ID, so zone names are
/// resolved through the `/zones?name=` lookup and memoized in a
/// [`ZoneCache`].
pub struct CloudflareProvider {
    pub(crate) client: LazyHttpClient,
    pub(crate) api_token: String,
    pub(crate) zone_cache: ZoneCache,
    pub(crate) max_retries: u32,
}

/// Builder for [`CloudflareProvider`] with configurable retry behavior.
pub struct CloudflareProviderBuilder {
    api_token: String,
    max_retries: u32,
}

impl CloudflareProviderBuilder {
    fn new(api_token: String) -> Self {
        Self {
            api_token,
            max_retries: 2,
        }
    }

    /// Set the maximum number of automatic retries for transient errors
    /// (default: 2). Only read-style calls retry.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`CloudflareProvider`] instance.
    pub fn build(self) -> CloudflareProvider {
        CloudflareProvider {
            client: LazyHttpClient::new(),
            api_token: self.api_token,
            zone_cache: ZoneCache::new(),
            max_retries: self.max_retries,
        }
    }
}

impl CloudflareProvider {
    /// Creates a new Cloudflare provider with default settings (2 retries).
    pub fn new(api_token: String) -> Self {
        Self::builder(api_token).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(api_token: String) -> CloudflareProviderBuilder {
        CloudflareProviderBuilder::new(api_token)
    }
}
