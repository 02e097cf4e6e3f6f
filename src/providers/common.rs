//! Shared helpers for the provider adapters.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha1::Sha1;
use sha2::Sha256;
use tokio::sync::{OnceCell, RwLock};

use crate::error::{ProviderError, Result};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// One provider instance's HTTP client, created on first use.
///
/// Concurrent first calls into the same adapter go through the `OnceCell`, so
/// exactly one client is ever built; a builder failure surfaces as an error
/// and construction is attempted again on the next call.
pub struct LazyHttpClient {
    client: OnceCell<Client>,
}

impl LazyHttpClient {
    pub fn new() -> Self {
        Self {
            client: OnceCell::new(),
        }
    }

    /// Returns the shared client, building it on the first call.
    pub async fn get(&self, provider: &str) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
                    .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
                    .build()
                    .map_err(|e| ProviderError::NetworkError {
                        provider: provider.to_string(),
                        detail: format!("failed to build HTTP client: {e}"),
                    })
            })
            .await
    }
}

impl Default for LazyHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============ HMAC ============

/// HMAC-SHA256 (used by the Huawei Cloud request signer).
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// HMAC-SHA1 (used by the AliCloud query-string signer).
pub fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

// ============ Name handling ============

/// Strips the trailing dot and lowercases a zone/domain name.
pub fn normalize_zone_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Converts a fully-qualified name to a zone-relative one.
/// `"www.example.com"` + `"example.com"` -> `"www"`;
/// `"example.com"` + `"example.com"` -> `"@"`.
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_zone_name(full_name);
    let zone = normalize_zone_name(zone_name);

    if full == zone {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full
    }
}

/// Converts a zone-relative name to a fully-qualified one.
/// `"www"` + `"example.com"` -> `"www.example.com"`;
/// `"@"` or `""` + `"example.com"` -> `"example.com"`.
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_zone_name(zone_name);

    if relative_name == "@" || relative_name.is_empty() {
        zone
    } else {
        format!("{relative_name}.{zone}")
    }
}

// ============ Zone-ID cache ============

/// How long a resolved zone ID stays cached.
const ZONE_CACHE_TTL_SECS: i64 = 300;

struct CachedZoneId {
    zone_id: String,
    cached_at: DateTime<Utc>,
}

/// Memoizes zone-name-to-zone-ID lookups for adapters whose APIs key
/// operations by an opaque zone ID (Cloudflare, Huawei Cloud).
///
/// Entries expire after five minutes so a zone recreated under a new ID is
/// picked up without a restart. When the API rejects a cached ID (the zone
/// was deleted), the adapter calls [`invalidate`](Self::invalidate) and
/// resolves again.
pub struct ZoneCache {
    entries: RwLock<HashMap<String, CachedZoneId>>,
    ttl: chrono::Duration,
}

impl ZoneCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::seconds(ZONE_CACHE_TTL_SECS),
        }
    }

    /// Returns the cached zone ID, or `None` if absent or expired.
    pub async fn get(&self, zone: &str) -> Option<String> {
        let key = normalize_zone_name(zone);
        let entries = self.entries.read().await;
        match entries.get(&key) {
            Some(entry) if Utc::now() - entry.cached_at < self.ttl => {
                Some(entry.zone_id.clone())
            }
            _ => None,
        }
    }

    pub async fn insert(&self, zone: &str, zone_id: String) {
        let key = normalize_zone_name(zone);
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CachedZoneId {
                zone_id,
                cached_at: Utc::now(),
            },
        );
    }

    /// Drops the entry for a zone, forcing the next lookup to hit the API.
    pub async fn invalidate(&self, zone: &str) {
        let key = normalize_zone_name(zone);
        let mut entries = self.entries.write().await;
        entries.remove(&key);
    }
}

impl Default for ZoneCache {
    fn default() -> Self {
        Self::new()
    }
}
