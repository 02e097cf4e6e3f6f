//! AliDNS `RecordProvider` implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_zone_name;
use crate::traits::{ErrorContext, RecordProvider};
use crate::types::{
    FieldType, ProviderCredentialField, ProviderMetadata, ProviderType, Record,
};

use super::types::AlidnsRecord;
use super::{
    AddDomainRecordResponse, AlidnsProvider, DeleteDomainRecordResponse,
    DescribeDomainRecordsResponse, MAX_PAGE_SIZE, UpdateDomainRecordResponse,
};

impl AlidnsProvider {
    /// The API's `RR` field: zone-relative name with `"@"` for the apex.
    fn rr_of(record: &Record) -> String {
        if record.is_apex() {
            "@".to_string()
        } else {
            record.name.clone()
        }
    }

    /// Parameters shared by `AddDomainRecord` and `UpdateDomainRecord`.
    /// TTL 0 means "provider default", so the parameter is omitted.
    fn record_data_params(record: &Record) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("RR".to_string(), Self::rr_of(record));
        params.insert("Type".to_string(), record.record_type.to_string());
        params.insert("Value".to_string(), record.value.clone());
        if record.ttl > 0 {
            params.insert("TTL".to_string(), record.ttl.to_string());
        }
        if record.record_type.uses_priority() {
            if let Some(priority) = record.priority {
                params.insert("Priority".to_string(), priority.to_string());
            }
        }
        params
    }
}

#[async_trait]
impl RecordProvider for AlidnsProvider {
    fn id(&self) -> &'static str {
        "alidns"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Alidns,
            name: "Alibaba Cloud DNS".to_string(),
            description: "Alibaba Cloud DNS (AliDNS) with Access Key authentication".to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "accessKeyId".to_string(),
                    label: "Access Key ID".to_string(),
                    field_type: FieldType::Text,
                },
                ProviderCredentialField {
                    key: "accessKeySecret".to_string(),
                    label: "Access Key Secret".to_string(),
                    field_type: FieldType::Password,
                },
            ],
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let mut params = BTreeMap::new();
        params.insert("PageNumber".to_string(), "1".to_string());
        params.insert("PageSize".to_string(), "1".to_string());

        match self
            .request::<serde_json::Value>(
                "DescribeDomains",
                params,
                ErrorContext::default(),
                true,
            )
            .await
        {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        let zone_name = normalize_zone_name(zone);
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            let mut params = BTreeMap::new();
            params.insert("DomainName".to_string(), zone_name.clone());
            params.insert("PageNumber".to_string(), page.to_string());
            params.insert("PageSize".to_string(), MAX_PAGE_SIZE.to_string());

            let ctx = ErrorContext {
                zone: Some(zone_name.clone()),
                ..Default::default()
            };
            let response: DescribeDomainRecordsResponse = self
                .request("DescribeDomainRecords", params, ctx, true)
                .await?;

            let total = response.total_count.unwrap_or(0) as usize;
            let batch = response
                .domain_records
                .and_then(|w| w.record)
                .unwrap_or_default();
            if batch.is_empty() {
                break;
            }
            records.extend(batch.into_iter().map(AlidnsRecord::into_record));
            if records.len() >= total {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn create_record(&self, zone: &str, record: &Record) -> Result<Record> {
        let zone_name = normalize_zone_name(zone);
        let mut params = Self::record_data_params(record);
        params.insert("DomainName".to_string(), zone_name.clone());

        let ctx = ErrorContext {
            zone: Some(zone_name),
            record_name: Some(record.name.clone()),
            ..Default::default()
        };
        let response: AddDomainRecordResponse =
            self.request("AddDomainRecord", params, ctx, false).await?;

        let mut created = record.clone();
        created.id = response.record_id;
        Ok(created)
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
        let mut params = Self::record_data_params(record);
        params.insert("RecordId".to_string(), record.id.clone());

        let ctx = ErrorContext {
            zone: Some(zone_name),
            record_id: Some(record.id.clone()),
            record_name: Some(record.name.clone()),
        };
        let result: Result<UpdateDomainRecordResponse> =
            self.request("UpdateDomainRecord", params, ctx, false).await;

        match result {
            Ok(_) => Ok(record.clone()),
            // The API rejects an update that changes nothing with
            // DomainRecordDuplicate; the record already holds the desired
            // data, which is exactly what the caller asked for.
            Err(ProviderError::RecordExists { .. }) => {
                log::debug!(
                    "[{}] update of record '{}' was a no-op, treating as success",
                    self.id(),
                    record.id
                );
                Ok(record.clone())
            }
            Err(e) => Err(e),
        }
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
        let mut params = BTreeMap::new();
        params.insert("RecordId".to_string(), record.id.clone());

        let ctx = ErrorContext {
            zone: Some(zone_name),
            record_id: Some(record.id.clone()),
            record_name: Some(record.name.clone()),
        };
        let _: DeleteDomainRecordResponse =
            self.request("DeleteDomainRecord", params, ctx, false).await?;
        Ok(())
    }
}
