//! AliDNS error-code mapping.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AlidnsProvider;

/// Error codes per <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>.
impl ProviderErrorMapper for AlidnsProvider {
    fn provider_name(&self) -> &'static str {
        "alidns"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ---- authentication ----
            Some("InvalidAccessKeyId.NotFound" | "SignatureDoesNotMatch") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // ---- record already exists ----
            Some("DomainRecordDuplicate" | "DomainRecordConflict") => ProviderError::RecordExists {
                provider: self.provider_name().to_string(),
                record_name: context.record_name.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- record not found ----
            Some(
                "DomainRecordNotBelongToUser" | "InvalidRecordId.NotFound" | "InvalidRR.NoExist",
            ) => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- zone not found ----
            Some("InvalidDomainName.NoExist" | "DomainNotFound") => ProviderError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone: context.zone.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- quota ----
            Some(
                "QuotaExceeded.ARecord"
                | "QuotaExceeded.Record"
                | "QuotaExceeded.FreeDnsRecord"
                | "QuotaExceeded.SubDomain"
                | "QuotaExceeded.TTL",
            ) => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ---- throttling (retryable) ----
            Some("Throttling" | "Throttling.User") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // ---- zone locked or disabled ----
            Some(
                "DomainRecordLocked"
                | "DomainExpiredDNSForbidden"
                | "Forbidden.DomainExpired"
                | "RecordForbidden.BlackHole",
            ) => ProviderError::ZoneLocked {
                provider: self.provider_name().to_string(),
                zone: context.zone.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ---- permission ----
            Some(
                "Forbidden"
                | "Forbidden.RiskControl"
                | "OperationDomain.NoPermission"
                | "IncorrectDomainUser",
            ) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ---- invalid parameters ----
            Some("InvalidRR.TypeEmpty" | "SubDomainInvalid.Type") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: "type".to_string(),
                    detail: raw.message,
                }
            }
            Some(
                "InvalidRR.AValue" | "InvalidRR.AAAAValue" | "InvalidRR.MXValue"
                | "InvalidRR.NSValue",
            ) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "value".to_string(),
                detail: raw.message,
            },
            Some("InvalidRR.RrEmpty" | "InvalidRR.Format" | "InvalidRR.Length") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: "rr".to_string(),
                    detail: raw.message,
                }
            }
            Some("SubDomainInvalid.TTL" | "InvalidTTL.Value") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "ttl".to_string(),
                detail: raw.message,
            },
            Some("SubDomainInvalid.Priority") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "priority".to_string(),
                detail: raw.message,
            },
            Some(
                "InvalidDomainName.Format"
                | "InvalidDomainName.Suffix"
                | "InvalidDomainName.Length"
                | "DomainEmpty",
            ) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "domain".to_string(),
                detail: raw.message,
            },

            // ---- fallback ----
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> AlidnsProvider {
        AlidnsProvider::new("id".to_string(), "secret".to_string())
    }

    #[test]
    fn maps_auth_codes() {
        let e = mapper().map_error(
            RawApiError::with_code("SignatureDoesNotMatch", "bad sig"),
            ErrorContext::default(),
        );
        assert!(matches!(e, ProviderError::InvalidCredentials { .. }), "{e}");
    }

    #[test]
    fn maps_zone_not_found_with_context() {
        let ctx = ErrorContext {
            zone: Some("example.com".to_string()),
            ..Default::default()
        };
        let e = mapper().map_error(
            RawApiError::with_code("InvalidDomainName.NoExist", "no such domain"),
            ctx,
        );
        match e {
            ProviderError::ZoneNotFound { zone, .. } => assert_eq!(zone, "example.com"),
            other => panic!("unexpected mapping: {other}"),
        }
    }

    #[test]
    fn maps_duplicate_record() {
        let ctx = ErrorContext {
            record_name: Some("www".to_string()),
            ..Default::default()
        };
        let e = mapper().map_error(
            RawApiError::with_code("DomainRecordDuplicate", "dup"),
            ctx,
        );
        assert!(matches!(e, ProviderError::RecordExists { .. }), "{e}");
    }

    #[test]
    fn maps_throttling_to_rate_limited() {
        let e = mapper().map_error(
            RawApiError::with_code("Throttling.User", "slow down"),
            ErrorContext::default(),
        );
        assert!(e.is_retryable(), "{e}");
    }

    #[test]
    fn unrecognized_code_falls_back_to_unknown() {
        let e = mapper().map_error(
            RawApiError::with_code("SomethingNew", "???"),
            ErrorContext::default(),
        );
        match e {
            ProviderError::Unknown { raw_code, .. } => {
                assert_eq!(raw_code.as_deref(), Some("SomethingNew"));
            }
            other => panic!("unexpected mapping: {other}"),
        }
    }
}
