//! Huawei Cloud DNS API types and record-set flattening.
//!
//! A record set holds every value for one name/type pair. The contract works
//! in single-value records, so each value gets a synthesized ID of the form
//! `"{recordset_id}:{index}"`; the index is the position in the set's
//! `records` array as last listed.

use serde::{Deserialize, Serialize};

use crate::providers::common::full_name_to_relative;
use crate::types::{Record, RecordType};

// ============ Response shapes ============

#[derive(Debug, Deserialize)]
pub struct ListZonesResponse {
    pub zones: Option<Vec<HuaweicloudZone>>,
    pub metadata: Option<ListMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct ListMetadata {
    pub total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct HuaweicloudZone {
    pub id: String,
    /// Fully qualified with trailing dot, e.g. `"example.com."`.
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListRecordSetsResponse {
    pub recordsets: Option<Vec<HuaweicloudRecordSet>>,
    pub metadata: Option<ListMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct HuaweicloudRecordSet {
    pub id: String,
    /// Fully qualified with trailing dot.
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub records: Option<Vec<String>>,
    pub ttl: Option<u32>,
}

/// Body for `CreateRecordSet` and `UpdateRecordSet`.
#[derive(Debug, Serialize)]
pub struct RecordSetBody {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub records: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Error payload returned by the API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub code: Option<String>,
    pub message: Option<String>,
}

// ============ Composite value IDs ============

/// Builds the synthesized per-value record ID.
pub fn format_value_id(recordset_id: &str, index: usize) -> String {
    format!("{recordset_id}:{index}")
}

/// Splits a synthesized ID back into `(recordset_id, index)`.
pub fn parse_value_id(id: &str) -> Option<(&str, usize)> {
    let (rrset_id, idx) = id.rsplit_once(':')?;
    if rrset_id.is_empty() {
        return None;
    }
    Some((rrset_id, idx.parse().ok()?))
}

// ============ Value encoding ============

/// Decodes one raw value from a record set into `(value, priority)`.
///
/// TXT values arrive wrapped in double quotes; MX values carry the priority
/// as a leading integer (`"10 mail.example.com."`).
pub fn decode_value(record_type: &RecordType, raw: &str) -> (String, Option<u16>) {
    match record_type {
        RecordType::Txt => {
            let trimmed = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(raw);
            (trimmed.to_string(), None)
        }
        RecordType::Mx => {
            if let Some((prio, rest)) = raw.split_once(' ') {
                if let Ok(priority) = prio.parse::<u16>() {
                    return (rest.to_string(), Some(priority));
                }
            }
            (raw.to_string(), None)
        }
        _ => (raw.to_string(), None),
    }
}

/// Encodes a contract record's value into the API's raw form.
pub fn encode_value(record: &Record) -> String {
    match &record.record_type {
        RecordType::Txt => {
            if record.value.starts_with('"') && record.value.ends_with('"') && record.value.len() >= 2
            {
                record.value.clone()
            } else {
                format!("\"{}\"", record.value)
            }
        }
        RecordType::Mx => match record.priority {
            Some(priority) => format!("{priority} {}", record.value),
            None => record.value.clone(),
        },
        _ => record.value.clone(),
    }
}

impl HuaweicloudRecordSet {
    /// Flattens the set into one contract record per value.
    pub fn into_records(self, zone: &str) -> Vec<Record> {
        let record_type = RecordType::parse(&self.record_type);
        let name = full_name_to_relative(&self.name, zone);
        let ttl = self.ttl.unwrap_or(0);

        self.records
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let (value, priority) = decode_value(&record_type, &raw);
                Record {
                    id: format_value_id(&self.id, index),
                    record_type: record_type.clone(),
                    name: name.clone(),
                    value,
                    ttl,
                    priority,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordType;

    #[test]
    fn value_id_roundtrip() {
        let id = format_value_id("ff8080828a9", 2);
        assert_eq!(id, "ff8080828a9:2");
        assert_eq!(parse_value_id(&id), Some(("ff8080828a9", 2)));
    }

    #[test]
    fn value_id_rejects_malformed() {
        assert_eq!(parse_value_id("no-separator"), None);
        assert_eq!(parse_value_id("abc:notanumber"), None);
        assert_eq!(parse_value_id(":0"), None);
    }

    #[test]
    fn txt_values_unquoted_on_read_quoted_on_write() {
        let (value, priority) = decode_value(&RecordType::Txt, "\"hello world\"");
        assert_eq!(value, "hello world");
        assert_eq!(priority, None);

        let encoded = encode_value(&Record::new(RecordType::Txt, "test1", "hello world"));
        assert_eq!(encoded, "\"hello world\"");

        // Already-quoted input is not double-wrapped.
        let encoded = encode_value(&Record::new(RecordType::Txt, "test1", "\"quoted\""));
        assert_eq!(encoded, "\"quoted\"");
    }

    #[test]
    fn mx_priority_embedded_in_value() {
        let (value, priority) = decode_value(&RecordType::Mx, "10 mail.example.com.");
        assert_eq!(value, "mail.example.com.");
        assert_eq!(priority, Some(10));

        let encoded = encode_value(
            &Record::new(RecordType::Mx, "@", "mail.example.com.").with_priority(10),
        );
        assert_eq!(encoded, "10 mail.example.com.");
    }

    #[test]
    fn plain_values_pass_through() {
        let (value, priority) = decode_value(&RecordType::A, "198.51.100.1");
        assert_eq!(value, "198.51.100.1");
        assert_eq!(priority, None);
    }

    #[test]
    fn recordset_flattens_to_one_record_per_value() {
        let set = HuaweicloudRecordSet {
            id: "rrset-1".to_string(),
            name: "www.example.com.".to_string(),
            record_type: "A".to_string(),
            records: Some(vec![
                "198.51.100.1".to_string(),
                "198.51.100.2".to_string(),
            ]),
            ttl: Some(300),
        };
        let records = set.into_records("example.com");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "rrset-1:0");
        assert_eq!(records[1].id, "rrset-1:1");
        assert_eq!(records[0].name, "www");
        assert_eq!(records[1].value, "198.51.100.2");
        assert_eq!(records[0].ttl, 300);
    }

    #[test]
    fn apex_recordset_name_maps_to_at() {
        let set = HuaweicloudRecordSet {
            id: "rrset-2".to_string(),
            name: "example.com.".to_string(),
            record_type: "TXT".to_string(),
            records: Some(vec!["\"v=spf1 -all\"".to_string()]),
            ttl: None,
        };
        let records = set.into_records("example.com");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "@");
        assert_eq!(records[0].value, "v=spf1 -all");
        assert_eq!(records[0].ttl, 0);
    }
}
