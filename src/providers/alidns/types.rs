//! AliDNS API response shapes.
//!
//! The query API nests record lists one level deeper than you'd expect
//! (`DomainRecords.Record`) and omits the wrapper entirely for empty pages,
//! hence the stacked `Option`s.

use serde::Deserialize;

use crate::types::{Record, RecordType};

#[derive(Debug, Deserialize)]
pub struct DescribeDomainRecordsResponse {
    #[serde(rename = "DomainRecords")]
    pub domain_records: Option<DomainRecordsWrapper>,
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DomainRecordsWrapper {
    #[serde(rename = "Record")]
    pub record: Option<Vec<AlidnsRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct AlidnsRecord {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "Priority")]
    pub priority: Option<u16>,
}

impl AlidnsRecord {
    /// Converts to the provider-neutral record shape. The API's `RR` field
    /// is already zone-relative with `"@"` for the apex.
    pub fn into_record(self) -> Record {
        Record {
            id: self.record_id,
            record_type: RecordType::parse(&self.record_type),
            name: self.rr,
            value: self.value,
            ttl: self.ttl,
            priority: self.priority,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
}
