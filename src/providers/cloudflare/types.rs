//! Cloudflare API type definitions.

use serde::{Deserialize, Serialize};

use crate::providers::common::{full_name_to_relative, relative_to_full_name};
use crate::types::{Record, RecordType};

/// The envelope every v4 API response comes wrapped in.
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
    pub result_info: Option<CloudflareResultInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    pub total_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
}

/// A DNS record as the API returns it.
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    /// Fully qualified, e.g. `"www.example.com"`.
    pub name: String,
    pub content: String,
    /// `1` means "automatic".
    pub ttl: u32,
    pub priority: Option<u16>,
}

impl CloudflareDnsRecord {
    /// Converts to the provider-neutral shape: the FQDN becomes
    /// zone-relative and the sentinel TTL `1` (automatic) becomes `0`.
    pub fn into_record(self, zone: &str) -> Record {
        Record {
            id: self.id,
            record_type: RecordType::parse(&self.record_type),
            name: full_name_to_relative(&self.name, zone),
            value: self.content,
            ttl: if self.ttl <= 1 { 0 } else { self.ttl },
            priority: self.priority,
        }
    }
}

/// Request body for creating or overwriting a record.
#[derive(Debug, Serialize)]
pub struct CloudflareRecordBody {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl CloudflareRecordBody {
    /// Builds the API body: the relative name becomes fully qualified and
    /// TTL `0` (provider default) becomes the API's `1` (automatic).
    pub fn from_record(record: &Record, zone: &str) -> Self {
        Self {
            record_type: record.record_type.to_string(),
            name: relative_to_full_name(&record.name, zone),
            content: record.value.clone(),
            ttl: if record.ttl == 0 { 1 } else { record.ttl },
            priority: if record.record_type.uses_priority() {
                record.priority
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordType;

    #[test]
    fn api_record_to_neutral_shape() {
        let api = CloudflareDnsRecord {
            id: "372e67954025e0ba6aaa6d586b9e0b59".to_string(),
            record_type: "A".to_string(),
            name: "www.example.com".to_string(),
            content: "198.51.100.4".to_string(),
            ttl: 3600,
            priority: None,
        };
        let r = api.into_record("example.com");
        assert_eq!(r.name, "www");
        assert_eq!(r.record_type, RecordType::A);
        assert_eq!(r.ttl, 3600);
    }

    #[test]
    fn automatic_ttl_maps_to_zero() {
        let api = CloudflareDnsRecord {
            id: "x".to_string(),
            record_type: "TXT".to_string(),
            name: "example.com".to_string(),
            content: "hello".to_string(),
            ttl: 1,
            priority: None,
        };
        let r = api.into_record("example.com");
        assert_eq!(r.ttl, 0);
        assert_eq!(r.name, "@");
    }

    #[test]
    fn default_ttl_maps_to_automatic() {
        let body =
            CloudflareRecordBody::from_record(&Record::new(RecordType::Txt, "test1", "hello"), "example.com");
        assert_eq!(body.ttl, 1);
        assert_eq!(body.name, "test1.example.com");
    }

    #[test]
    fn explicit_ttl_passes_through() {
        let body = CloudflareRecordBody::from_record(
            &Record::new(RecordType::A, "@", "198.51.100.4").with_ttl(300),
            "example.com.",
        );
        assert_eq!(body.ttl, 300);
        assert_eq!(body.name, "example.com");
    }

    #[test]
    fn priority_only_for_priority_types() {
        let mx = CloudflareRecordBody::from_record(
            &Record::new(RecordType::Mx, "@", "mx.example.com").with_priority(10),
            "example.com",
        );
        assert_eq!(mx.priority, Some(10));

        let a = CloudflareRecordBody::from_record(
            &Record::new(RecordType::A, "www", "1.2.3.4").with_priority(10),
            "example.com",
        );
        assert_eq!(a.priority, None);
    }

    #[test]
    fn parse_error_envelope() {
        let json = r#"{
            "success": false,
            "errors": [{"code": 81044, "message": "Record does not exist."}],
            "messages": [],
            "result": null
        }"#;
        let res: serde_json::Result<CloudflareResponse<CloudflareDnsRecord>> =
            serde_json::from_str(json);
        assert!(res.is_ok(), "parse failed: {res:?}");
        let Ok(parsed) = res else {
            return;
        };
        assert!(!parsed.success);
        assert_eq!(
            parsed.errors.and_then(|e| e.first().map(|e| e.code)),
            Some(81044)
        );
    }
}
