//! In-process reference provider.
//!
//! Stores zones in memory behind a `tokio` lock. Useful as a test double
//! for code written against [`RecordProvider`] and as a reference for the
//! contract's semantics; it never talks to the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_zone_name;
use crate::traits::RecordProvider;
use crate::types::{ProviderMetadata, ProviderType, Record};

/// In-memory store of zones and their records.
pub struct MemoryProvider {
    zones: RwLock<HashMap<String, Vec<Record>>>,
    next_id: AtomicU64,
}

impl MemoryProvider {
    /// Creates an empty provider with no zones.
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a provider pre-seeded with one empty zone.
    pub fn with_zone(zone: &str) -> Self {
        let mut zones = HashMap::new();
        zones.insert(normalize_zone_name(zone), Vec::new());
        Self {
            zones: RwLock::new(zones),
            next_id: AtomicU64::new(1),
        }
    }

    /// Adds a zone (idempotent; existing records are kept).
    pub async fn add_zone(&self, zone: &str) {
        self.zones
            .write()
            .await
            .entry(normalize_zone_name(zone))
            .or_default();
    }

    fn fresh_id(&self) -> String {
        format!("mem-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn zone_not_found(&self, zone: &str) -> ProviderError {
        ProviderError::ZoneNotFound {
            provider: self.id().to_string(),
            zone: zone.to_string(),
            raw_message: None,
        }
    }

    fn record_not_found(&self, record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: self.id().to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordProvider for MemoryProvider {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Memory,
            name: "In-Memory".to_string(),
            description: "In-process store for testing and local development".to_string(),
            required_fields: vec![],
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        Ok(true)
    }

    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        let zone_name = normalize_zone_name(zone);
        let zones = self.zones.read().await;
        zones
            .get(&zone_name)
            .cloned()
            .ok_or_else(|| self.zone_not_found(&zone_name))
    }

    async fn create_record(&self, zone: &str, record: &Record) -> Result<Record> {
        let zone_name = normalize_zone_name(zone);
        let mut zones = self.zones.write().await;
        let records = zones
            .get_mut(&zone_name)
            .ok_or_else(|| self.zone_not_found(&zone_name))?;

        let mut created = record.clone();
        created.id = self.fresh_id();
        records.push(created.clone());
        Ok(created)
    }

    async fn update_record(&self, zone: &str, record: &Record) -> Result<Record> {
        let zone_name = normalize_zone_name(zone);
        let mut zones = self.zones.write().await;
        let records = zones
            .get_mut(&zone_name)
            .ok_or_else(|| self.zone_not_found(&zone_name))?;

        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record.clone())
            }
            None => Err(self.record_not_found(&record.id)),
        }
    }

    async fn delete_record(&self, zone: &str, record: &Record) -> Result<()> {
        let zone_name = normalize_zone_name(zone);
        let mut zones = self.zones.write().await;
        let records = zones
            .get_mut(&zone_name)
            .ok_or_else(|| self.zone_not_found(&zone_name))?;

        match records.iter().position(|r| r.id == record.id) {
            Some(index) => {
                records.remove(index);
                Ok(())
            }
            None => Err(self.record_not_found(&record.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordType;

    #[tokio::test]
    async fn unknown_zone_is_zone_not_found() {
        let provider = MemoryProvider::new();
        let result = provider.get_records("nope.example").await;
        assert!(matches!(
            result,
            Err(ProviderError::ZoneNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let provider = MemoryProvider::with_zone("example.com");
        let a = provider
            .create_record("example.com", &Record::new(RecordType::A, "www", "1.1.1.1"))
            .await;
        let b = provider
            .create_record("example.com", &Record::new(RecordType::A, "www", "2.2.2.2"))
            .await;
        assert!(a.is_ok());
        assert!(b.is_ok());
        let (Ok(a), Ok(b)) = (a, b) else { return };
        assert!(a.has_id());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn zone_names_are_normalized() {
        let provider = MemoryProvider::with_zone("Example.COM.");
        let created = provider
            .create_record("example.com", &Record::new(RecordType::A, "www", "1.1.1.1"))
            .await;
        assert!(created.is_ok());
        let listed = provider.get_records("EXAMPLE.com").await;
        assert!(listed.is_ok());
        let Ok(listed) = listed else { return };
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_record_not_found() {
        let provider = MemoryProvider::with_zone("example.com");
        let mut record = Record::new(RecordType::A, "www", "1.1.1.1");
        record.id = "mem-999".to_string();
        let result = provider.update_record("example.com", &record).await;
        assert!(matches!(
            result,
            Err(ProviderError::RecordNotFound { .. })
        ));
    }
}
