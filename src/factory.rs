//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::RecordProvider;
use crate::types::{ProviderCredentials, ProviderMetadata};

#[cfg(feature = "alidns")]
use crate::providers::AlidnsProvider;
#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;
#[cfg(feature = "huaweicloud")]
use crate::providers::HuaweicloudProvider;
#[cfg(feature = "memory")]
use crate::providers::MemoryProvider;

/// Creates a [`RecordProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`]
/// variant. The returned provider is wrapped in `Arc<dyn RecordProvider>` for
/// easy sharing across async tasks.
///
/// The in-memory provider takes no credentials; construct
/// [`MemoryProvider`](crate::MemoryProvider) directly instead.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_provider_bridge::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Cloudflare {
///     api_token: "your-token".to_string(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn RecordProvider>> {
    match credentials {
        #[cfg(feature = "alidns")]
        ProviderCredentials::Alidns {
            access_key_id,
            access_key_secret,
        } => Ok(Arc::new(AlidnsProvider::new(
            access_key_id,
            access_key_secret,
        ))),
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { api_token } => {
            Ok(Arc::new(CloudflareProvider::new(api_token)))
        }
        #[cfg(feature = "huaweicloud")]
        ProviderCredentials::Huaweicloud {
            access_key_id,
            secret_access_key,
        } => Ok(Arc::new(HuaweicloudProvider::new(
            access_key_id,
            secret_access_key,
        ))),
    }
}

/// Returns metadata for all providers enabled via feature flags.
///
/// Useful for building dynamic UIs that enumerate available providers
/// and their required credential fields.
pub fn all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "alidns")]
        AlidnsProvider::metadata(),
        #[cfg(feature = "cloudflare")]
        CloudflareProvider::metadata(),
        #[cfg(feature = "huaweicloud")]
        HuaweicloudProvider::metadata(),
        #[cfg(feature = "memory")]
        MemoryProvider::metadata(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_covers_every_enabled_provider() {
        let metadata = all_provider_metadata();
        assert!(!metadata.is_empty());
        for meta in &metadata {
            assert!(!meta.name.is_empty());
        }
    }

    #[cfg(feature = "cloudflare")]
    #[test]
    fn create_provider_from_cloudflare_credentials() {
        let provider = create_provider(ProviderCredentials::Cloudflare {
            api_token: "token".to_string(),
        });
        assert!(provider.is_ok());
        let Ok(provider) = provider else { return };
        assert_eq!(provider.id(), "cloudflare");
    }
}
