//! Cloudflare HTTP request path.
//!
//! One generic entry point instead of per-verb near-copies: every call goes
//! through [`CloudflareProvider::execute`], which unwraps the
//! `{ success, result, errors, result_info }` envelope and maps API errors.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// Sends one API call and returns the checked envelope.
    async fn execute<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
        retryable: bool,
    ) -> Result<CloudflareResponse<T>> {
        let url = format!("{CF_API_BASE}{path}");
        let method_name = method.as_str().to_string();

        let client = self.client.get(self.provider_name()).await?;
        let mut request = client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.api_token));
        if let Some(body) = body {
            request = request.json(body);
        }

        let max_retries = if retryable { self.max_retries } else { 0 };
        let (_, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            &method_name,
            &url,
            max_retries,
        )
        .await?;

        let envelope: CloudflareResponse<T> =
            HttpUtils::parse_json(&response_text, self.provider_name())?;

        if !envelope.success {
            let (code, message) = envelope
                .errors
                .as_ref()
                .and_then(|errors| errors.first())
                .map(|e| (e.code.to_string(), e.message.clone()))
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            log::error!("[{}] API error: {code} - {message}", self.provider_name());
            return Err(self.map_error(RawApiError::with_code(code, message), ctx));
        }

        Ok(envelope)
    }

    /// GET one page of a listing; returns the items plus the reported total.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<(Vec<T>, u32)> {
        let envelope = self
            .execute::<Vec<T>, ()>(Method::GET, path, None, ctx, true)
            .await?;
        let total = envelope.result_info.map_or(0, |i| i.total_count);
        Ok((envelope.result.unwrap_or_default(), total))
    }

    /// POST a body, returning the created object.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let envelope = self
            .execute::<T, B>(Method::POST, path, Some(body), ctx, false)
            .await?;
        envelope
            .result
            .ok_or_else(|| self.parse_error("response is missing the result field"))
    }

    /// PUT a body, returning the overwritten object.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let envelope = self
            .execute::<T, B>(Method::PUT, path, Some(body), ctx, false)
            .await?;
        envelope
            .result
            .ok_or_else(|| self.parse_error("response is missing the result field"))
    }

    /// DELETE; the result payload (just `{"id": ...}`) is discarded.
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.execute::<serde_json::Value, ()>(Method::DELETE, path, None, ctx, false)
            .await?;
        Ok(())
    }
}
