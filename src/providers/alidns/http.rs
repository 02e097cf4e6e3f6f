//! AliDNS HTTP request path.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::sign::{canonical_query_string, percent_encode, sign_request};
use super::{ALIDNS_API_VERSION, ALIDNS_HOST, AlidnsProvider};

/// Pulls `Code`/`Message` out of an API body when both are present.
/// Success bodies carry neither.
fn extract_api_error(value: &serde_json::Value) -> Option<(String, String)> {
    let code = value.get("Code").and_then(|v| v.as_str())?;
    let message = value.get("Message").and_then(|v| v.as_str())?;
    Some((code.to_string(), message.to_string()))
}

impl AlidnsProvider {
    /// Executes one signed query-API call (RPC style, all parameters in the
    /// query string of a GET).
    ///
    /// `retryable` opts the call into transient-error retries; only pass
    /// `true` for read calls, a replayed mutation is not idempotent here.
    pub(crate) async fn request<T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        action_params: BTreeMap<String, String>,
        ctx: ErrorContext,
        retryable: bool,
    ) -> Result<T> {
        let mut params = action_params;
        params.insert("Action".to_string(), action.to_string());
        params.insert("Version".to_string(), ALIDNS_API_VERSION.to_string());
        params.insert("Format".to_string(), "JSON".to_string());
        params.insert("AccessKeyId".to_string(), self.access_key_id.clone());
        params.insert("SignatureMethod".to_string(), "HMAC-SHA1".to_string());
        params.insert("SignatureVersion".to_string(), "1.0".to_string());
        params.insert(
            "SignatureNonce".to_string(),
            uuid::Uuid::new_v4().to_string(),
        );
        params.insert(
            "Timestamp".to_string(),
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        );

        let signature = sign_request(&self.access_key_secret, "GET", &params);
        let url = format!(
            "https://{ALIDNS_HOST}/?{}&Signature={}",
            canonical_query_string(&params),
            percent_encode(&signature)
        );

        let client = self.client.get(self.provider_name()).await?;
        let request = client.get(&url);
        let max_retries = if retryable { self.max_retries } else { 0 };
        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "GET",
            &format!("{ALIDNS_HOST} (Action: {action})"),
            max_retries,
        )
        .await?;

        // Errors come back as HTTP 4xx with Code/Message in the JSON body.
        if status >= 400 {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&response_text) {
                if let Some((code, message)) = extract_api_error(&value) {
                    log::error!("[{}] API error: {code} - {message}", self.provider_name());
                    return Err(self.map_error(RawApiError::with_code(code, message), ctx));
                }
            }
            return Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("HTTP {status}: {response_text}"),
            });
        }

        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;

        // Some gateways report errors with HTTP 200.
        if let Some((code, message)) = extract_api_error(&value) {
            log::error!("[{}] API error: {code} - {message}", self.provider_name());
            return Err(self.map_error(RawApiError::with_code(code, message), ctx));
        }

        serde_json::from_value(value).map_err(|e| ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_api_error_present() {
        let v = json!({"Code": "InvalidDomainName.NoExist", "Message": "no such domain", "RequestId": "x"});
        assert_eq!(
            extract_api_error(&v),
            Some((
                "InvalidDomainName.NoExist".to_string(),
                "no such domain".to_string()
            ))
        );
    }

    #[test]
    fn extract_api_error_absent_on_success_body() {
        let v = json!({"RequestId": "x", "TotalCount": 3});
        assert_eq!(extract_api_error(&v), None);
    }
}
