//! Huawei Cloud error mapping.
//!
//! Reference: <https://support.huaweicloud.com/api-dns/ErrorCode.html>
//!
//! Only the error families the adapter can actually hit are mapped; PTR,
//! DNSSEC, VPC-association and health-check codes fall through to `Unknown`.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::HuaweicloudProvider;

impl ProviderErrorMapper for HuaweicloudProvider {
    fn provider_name(&self) -> &'static str {
        "huaweicloud"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ---- authentication ----
            Some(
                "APIGW.0301" // IAM auth info error
                | "APIGW.0303" // app auth info error
                | "APIGW.0305" // generic auth error
                | "DNS.0005"   // auth failed
                | "DNS.0013",  // no permission for API
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ---- permission ----
            Some("APIGW.0302" | "APIGW.0306" | "DNS.0030" | "DNS.1802") => {
                ProviderError::PermissionDenied {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // ---- throttled at the gateway (retryable) ----
            Some("APIGW.0308") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // ---- quota ----
            Some("DNS.0403" | "DNS.0404" | "DNS.0408" | "DNS.0409" | "DNS.2002") => {
                ProviderError::QuotaExceeded {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // ---- record set already exists ----
            Some("DNS.0312" | "DNS.0335" | "DNS.0016") => ProviderError::RecordExists {
                provider: self.provider_name().to_string(),
                record_name: context.record_name.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- record set not found ----
            Some("DNS.0313" | "DNS.0004") => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- zone not found ----
            Some("DNS.0302" | "DNS.0101" | "DNS.1206") => ProviderError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone: context.zone.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- zone disabled ----
            Some("DNS.0209" | "DNS.0213" | "DNS.0214") => ProviderError::ZoneLocked {
                provider: self.provider_name().to_string(),
                zone: context.zone.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- invalid parameters ----
            Some("DNS.0303") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "ttl".to_string(),
                detail: raw.message,
            },
            Some("DNS.0307") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "type".to_string(),
                detail: raw.message,
            },
            Some("DNS.0308") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "records".to_string(),
                detail: raw.message,
            },
            Some("DNS.0304") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "name".to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
