//! Cloudflare `RecordProvider` implementation.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_zone_name;
use crate::traits::{ErrorContext, RecordProvider};
use crate::types::{
    FieldType, ProviderCredentialField, ProviderMetadata, ProviderType, Record,
};

use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareRecordBody, CloudflareZone,
    MAX_PAGE_SIZE_RECORDS, MAX_PAGE_SIZE_ZONES,
};

impl CloudflareProvider {
    /// Resolves a zone name to its opaque zone ID, memoized in the cache.
    pub(crate) async fn zone_id(&self, zone: &str) -> Result<String> {
        let zone_name = normalize_zone_name(zone);
        if let Some(id) = self.zone_cache.get(&zone_name).await {
            return Ok(id);
        }

        let ctx = ErrorContext {
            zone: Some(zone_name.clone()),
            ..Default::default()
        };
        let (zones, _): (Vec<CloudflareZone>, u32) = self
            .get_page(
                &format!("/zones?name={zone_name}&per_page={MAX_PAGE_SIZE_ZONES}"),
                ctx,
            )
            .await?;

        let id = zones
            .into_iter()
            .find(|z| normalize_zone_name(&z.name) == zone_name)
            .map(|z| z.id)
            .ok_or_else(|| ProviderError::ZoneNotFound {
                provider: "cloudflare".to_string(),
                zone: zone_name.clone(),
                raw_message: None,
            })?;

        self.zone_cache.insert(&zone_name, id.clone()).await;
        Ok(id)
    }

    /// Drops the cached zone ID when an operation reports the zone gone, so
    /// the next call re-resolves instead of replaying a stale ID.
    async fn invalidate_on_zone_error<T>(&self, zone: &str, result: Result<T>) -> Result<T> {
        if let Err(ProviderError::ZoneNotFound { .. }) = &result {
            self.zone_cache.invalidate(zone).await;
        }
        result
    }
}

#[async_trait]
impl RecordProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Cloudflare,
            name: "Cloudflare".to_string(),
            description: "Cloudflare DNS with scoped API token authentication".to_string(),
            required_fields: vec![ProviderCredentialField {
                key: "apiToken".to_string(),
                label: "API Token".to_string(),
                field_type: FieldType::Password,
            }],
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let result: Result<(Vec<CloudflareZone>, u32)> = self
            .get_page("/zones?per_page=1", ErrorContext::default())
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        let zone_name = normalize_zone_name(zone);
        let zone_id = self.zone_id(&zone_name).await?;

        let mut records = Vec::new();
        let mut page = 1u32;
        loop {
            let ctx = ErrorContext {
                zone: Some(zone_name.clone()),
                ..Default::default()
            };
            let result = self
                .get_page::<CloudflareDnsRecord>(
                    &format!(
                        "/zones/{zone_id}/dns_records?page={page}&per_page={MAX_PAGE_SIZE_RECORDS}"
                    ),
                    ctx,
                )
                .await;
            let (batch, total) = self.invalidate_on_zone_error(&zone_name, result).await?;

            if batch.is_empty() {
                break;
            }
            records.extend(batch.into_iter().map(|r| r.into_record(&zone_name)));
            if records.len() >= total as usize {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn create_record(&self, zone: &str, record: &Record) -> Result<Record> {
        let zone_name = normalize_zone_name(zone);
        let zone_id = self.zone_id(&zone_name).await?;

        let body = CloudflareRecordBody::from_record(record, &zone_name);
        let ctx = ErrorContext {
            zone: Some(zone_name.clone()),
            record_name: Some(record.name.clone()),
            ..Default::default()
        };
        let result = self
            .post::<CloudflareDnsRecord, _>(&format!("/zones/{zone_id}/dns_records"), &body, ctx)
            .await;
        let created = self.invalidate_on_zone_error(&zone_name, result).await?;
        Ok(created.into_record(&zone_name))
    }

    async fn update_record(&self, zone: &str, record: &Record) -> Result<Record> {
        if !record.has_id() {
            return Err(ProviderError::InvalidParameter {
                provider: self.id().to_string(),
                param: "id".to_string(),
                detail: "update requires a record ID".to_string(),
            });
        }

        let zone_name = normalize_zone_name(zone);
        let zone_id = self.zone_id(&zone_name).await?;

        let body = CloudflareRecordBody::from_record(record, &zone_name);
        let ctx = ErrorContext {
            zone: Some(zone_name.clone()),
            record_id: Some(record.id.clone()),
            record_name: Some(record.name.clone()),
        };
        let result = self
            .put::<CloudflareDnsRecord, _>(
                &format!("/zones/{zone_id}/dns_records/{}", record.id),
                &body,
                ctx,
            )
            .await;
        let updated = self.invalidate_on_zone_error(&zone_name, result).await?;
        Ok(updated.into_record(&zone_name))
    }

    async fn delete_record(&self, zone: &str, record: &Record) -> Result<()> {
        if !record.has_id() {
            return Err(ProviderError::InvalidParameter {
                provider: self.id().to_string(),
                param: "id".to_string(),
                detail: "delete requires a record ID".to_string(),
            });
        }

        let zone_name = normalize_zone_name(zone);
        let zone_id = self.zone_id(&zone_name).await?;

        let ctx = ErrorContext {
            zone: Some(zone_name.clone()),
            record_id: Some(record.id.clone()),
            record_name: Some(record.name.clone()),
        };
        let result = self
            .delete(&format!("/zones/{zone_id}/dns_records/{}", record.id), ctx)
            .await;
        self.invalidate_on_zone_error(&zone_name, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_lists_token_field() {
        let meta = CloudflareProvider::metadata();
        assert_eq!(meta.id, ProviderType::Cloudflare);
        assert_eq!(meta.required_fields.len(), 1);
        assert_eq!(meta.required_fields[0].key, "apiToken");
        assert_eq!(meta.required_fields[0].field_type, FieldType::Password);
    }
}
