//! Huawei Cloud `RecordProvider` implementation.
//!
//! Every contract record maps to one value inside a record set, so the
//! primitives here work read-modify-write against the owning set: create
//! appends a value (or creates the set), update rewrites one value in
//! place, delete removes one value and drops the set when it empties.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_zone_name, relative_to_full_name};
use crate::traits::{ErrorContext, RecordProvider};
use crate::types::{
    FieldType, ProviderCredentialField, ProviderMetadata, ProviderType, Record,
};

use super::types::{
    HuaweicloudRecordSet, ListRecordSetsResponse, ListZonesResponse, RecordSetBody, encode_value,
    format_value_id, parse_value_id,
};
use super::{HuaweicloudProvider, MAX_PAGE_SIZE};

impl HuaweicloudProvider {
    fn zone_ctx(zone: &str) -> ErrorContext {
        ErrorContext {
            zone: Some(zone.to_string()),
            ..Default::default()
        }
    }

    /// The API spells names fully qualified with a trailing dot.
    fn fqdn_of(record: &Record, zone: &str) -> String {
        format!("{}.", relative_to_full_name(&record.name, zone))
    }

    /// Resolves a zone name to its zone ID, memoized in the cache.
    pub(crate) async fn zone_id(&self, zone: &str) -> Result<String> {
        let zone_name = normalize_zone_name(zone);
        if let Some(id) = self.zone_cache.get(&zone_name).await {
            return Ok(id);
        }

        let response: ListZonesResponse = self
            .get(
                "/v2/zones",
                &format!("type=public&name={zone_name}"),
                Self::zone_ctx(&zone_name),
            )
            .await?;

        // The name filter is a substring search; insist on an exact match.
        let id = response
            .zones
            .unwrap_or_default()
            .into_iter()
            .find(|z| normalize_zone_name(&z.name) == zone_name)
            .map(|z| z.id)
            .ok_or_else(|| ProviderError::ZoneNotFound {
                provider: "huaweicloud".to_string(),
                zone: zone_name.clone(),
                raw_message: None,
            })?;

        self.zone_cache.insert(&zone_name, id.clone()).await;
        Ok(id)
    }

    async fn invalidate_on_zone_error<T>(&self, zone: &str, result: Result<T>) -> Result<T> {
        if let Err(ProviderError::ZoneNotFound { .. }) = &result {
            self.zone_cache.invalidate(zone).await;
        }
        result
    }

    /// Fetches one record set by ID.
    async fn fetch_recordset(
        &self,
        zone_id: &str,
        recordset_id: &str,
        ctx: ErrorContext,
    ) -> Result<HuaweicloudRecordSet> {
        self.get(
            &format!("/v2/zones/{zone_id}/recordsets/{recordset_id}"),
            "",
            ctx,
        )
        .await
    }

    /// Finds the record set exactly matching an FQDN and type, if any.
    async fn find_recordset(
        &self,
        zone_id: &str,
        fqdn: &str,
        record_type: &str,
        ctx: ErrorContext,
    ) -> Result<Option<HuaweicloudRecordSet>> {
        let response: ListRecordSetsResponse = self
            .get(
                &format!("/v2/zones/{zone_id}/recordsets"),
                &format!("name={fqdn}&type={record_type}&limit={MAX_PAGE_SIZE}"),
                ctx,
            )
            .await?;

        Ok(response
            .recordsets
            .unwrap_or_default()
            .into_iter()
            .find(|r| r.name == fqdn && r.record_type == record_type))
    }

    /// Rewrites a record set's value list in place.
    async fn put_recordset_values(
        &self,
        zone_id: &str,
        set: &HuaweicloudRecordSet,
        records: Vec<String>,
        ttl: Option<u32>,
        ctx: ErrorContext,
    ) -> Result<HuaweicloudRecordSet> {
        let body = RecordSetBody {
            name: set.name.clone(),
            record_type: set.record_type.clone(),
            records,
            ttl: ttl.or(set.ttl),
        };
        self.put(
            &format!("/v2/zones/{zone_id}/recordsets/{}", set.id),
            &body,
            ctx,
        )
        .await
    }
}

#[async_trait]
impl RecordProvider for HuaweicloudProvider {
    fn id(&self) -> &'static str {
        "huaweicloud"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Huaweicloud,
            name: "Huawei Cloud DNS".to_string(),
            description: "Huawei Cloud DNS with AK/SK request signing".to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "accessKeyId".to_string(),
                    label: "Access Key ID".to_string(),
                    field_type: FieldType::Text,
                },
                ProviderCredentialField {
                    key: "secretAccessKey".to_string(),
                    label: "Secret Access Key".to_string(),
                    field_type: FieldType::Password,
                },
            ],
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let result: Result<ListZonesResponse> = self
            .get("/v2/zones", "limit=1", ErrorContext::default())
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
        let mut offset = 0u32;
        loop {
            let result: Result<ListRecordSetsResponse> = self
                .get(
                    &format!("/v2/zones/{zone_id}/recordsets"),
                    &format!("limit={MAX_PAGE_SIZE}&offset={offset}"),
                    Self::zone_ctx(&zone_name),
                )
                .await;
            let response = self.invalidate_on_zone_error(&zone_name, result).await?;

            let sets = response.recordsets.unwrap_or_default();
            if sets.is_empty() {
                break;
            }
            let fetched = sets.len() as u32;
            for set in sets {
                records.extend(set.into_records(&zone_name));
            }

            offset += fetched;
            let total = response
                .metadata
                .and_then(|m| m.total_count)
                .unwrap_or(offset);
            if offset >= total {
                break;
            }
        }

        Ok(records)
    }

    async fn create_record(&self, zone: &str, record: &Record) -> Result<Record> {
        let zone_name = normalize_zone_name(zone);
        let zone_id = self.zone_id(&zone_name).await?;

        let fqdn = Self::fqdn_of(record, &zone_name);
        let record_type = record.record_type.to_string();
        let encoded = encode_value(record);
        let ttl = if record.ttl > 0 { Some(record.ttl) } else { None };

        let ctx = ErrorContext {
            zone: Some(zone_name.clone()),
            record_name: Some(record.name.clone()),
            ..Default::default()
        };

        let existing = self
            .find_recordset(&zone_id, &fqdn, &record_type, ctx.clone())
            .await;
        let existing = self.invalidate_on_zone_error(&zone_name, existing).await?;

        let (recordset_id, index) = match existing {
            Some(set) => {
                let mut values = set.records.clone().unwrap_or_default();
                if values.contains(&encoded) {
                    return Err(ProviderError::RecordExists {
                        provider: self.id().to_string(),
                        record_name: record.name.clone(),
                        raw_message: None,
                    });
                }
                values.push(encoded);
                let index = values.len() - 1;
                let updated = self
                    .put_recordset_values(&zone_id, &set, values, ttl, ctx)
                    .await?;
                (updated.id, index)
            }
            None => {
                let body = RecordSetBody {
                    name: fqdn,
                    record_type,
                    records: vec![encoded],
                    ttl,
                };
                let created: HuaweicloudRecordSet = self
                    .post(&format!("/v2/zones/{zone_id}/recordsets"), &body, ctx)
                    .await?;
                (created.id, 0)
            }
        };

        let mut created = record.clone();
        created.id = format_value_id(&recordset_id, index);
        Ok(created)
    }

    async fn update_record(&self, zone: &str, record: &Record) -> Result<Record> {
        let Some((recordset_id, index)) = parse_value_id(&record.id) else {
            return Err(ProviderError::InvalidParameter {
                provider: self.id().to_string(),
                param: "id".to_string(),
                detail: format!("'{}' is not a '<recordset>:<index>' record ID", record.id),
            });
        };

        let zone_name = normalize_zone_name(zone);
        let zone_id = self.zone_id(&zone_name).await?;

        let ctx = ErrorContext {
            zone: Some(zone_name.clone()),
            record_id: Some(record.id.clone()),
            record_name: Some(record.name.clone()),
        };
        let set = self
            .fetch_recordset(&zone_id, recordset_id, ctx.clone())
            .await;
        let set = self.invalidate_on_zone_error(&zone_name, set).await?;

        let mut values = set.records.clone().unwrap_or_default();
        if index >= values.len() {
            return Err(ProviderError::RecordNotFound {
                provider: self.id().to_string(),
                record_id: record.id.clone(),
                raw_message: None,
            });
        }
        values[index] = encode_value(record);

        let ttl = if record.ttl > 0 { Some(record.ttl) } else { None };
        self.put_recordset_values(&zone_id, &set, values, ttl, ctx)
            .await?;
        Ok(record.clone())
    }

    async fn delete_record(&self, zone: &str, record: &Record) -> Result<()> {
        let Some((recordset_id, index)) = parse_value_id(&record.id) else {
            return Err(ProviderError::InvalidParameter {
                provider: self.id().to_string(),
                param: "id".to_string(),
                detail: format!("'{}' is not a '<recordset>:<index>' record ID", record.id),
            });
        };

        let zone_name = normalize_zone_name(zone);
        let zone_id = self.zone_id(&zone_name).await?;

        let ctx = ErrorContext {
            zone: Some(zone_name.clone()),
            record_id: Some(record.id.clone()),
            record_name: Some(record.name.clone()),
        };
        let set = self
            .fetch_recordset(&zone_id, recordset_id, ctx.clone())
            .await;
        let set = self.invalidate_on_zone_error(&zone_name, set).await?;

        let mut values = set.records.clone().unwrap_or_default();
        // Earlier deletes in a batch shift the value indices, so re-anchor on
        // the value itself when the index no longer points at it.
        let encoded = encode_value(record);
        let index = if values.get(index) == Some(&encoded) {
            index
        } else {
            values.iter().position(|v| *v == encoded).ok_or_else(|| {
                ProviderError::RecordNotFound {
                    provider: self.id().to_string(),
                    record_id: record.id.clone(),
                    raw_message: None,
                }
            })?
        };

        if values.len() == 1 {
            // Last value: the set itself goes away.
            self.delete(
                &format!("/v2/zones/{zone_id}/recordsets/{recordset_id}"),
                ctx,
            )
            .await
        } else {
            values.remove(index);
            self.put_recordset_values(&zone_id, &set, values, None, ctx)
                .await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordType;

    #[test]
    fn fqdn_is_trailing_dot_qualified() {
        let r = Record::new(RecordType::A, "www", "1.2.3.4");
        assert_eq!(
            HuaweicloudProvider::fqdn_of(&r, "example.com"),
            "www.example.com."
        );
        let apex = Record::new(RecordType::A, "@", "1.2.3.4");
        assert_eq!(
            HuaweicloudProvider::fqdn_of(&apex, "example.com"),
            "example.com."
        );
    }

    #[test]
    fn metadata_lists_ak_sk_fields() {
        let meta = HuaweicloudProvider::metadata();
        assert_eq!(meta.id, ProviderType::Huaweicloud);
        let keys: Vec<&str> = meta
            .required_fields
            .iter()
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(keys, vec!["accessKeyId", "secretAccessKey"]);
    }
}
