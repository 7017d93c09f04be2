use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::cache::ResponseCache;
use super::query::{build_url, QueryParams};
use crate::config::CoinPulseConfig;
use crate::error::{CoinPulseError, Result, PLAN_REQUIRED_ERROR_CODE};

pub const API_KEY_HEADER: &str = "x-cg-pro-api-key";

pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(60);

// Clones share the response cache.
#[derive(Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<ResponseCache>,
}

impl MarketDataClient {
    pub fn new(config: &CoinPulseConfig) -> Result<Self> {
        config.provider.validate()?;

        let api_key = HeaderValue::from_str(&config.provider.api_key)
            .map_err(|_| CoinPulseError::config_error("COINGECKO_API_KEY is not a valid header value"))?;
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.timeout_secs))
            .user_agent("CoinPulse/0.1.0")
            .default_headers(headers)
            .build()
            .map_err(|e| CoinPulseError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.provider.base_url.trim_end_matches('/').to_string(),
            cache: Arc::new(ResponseCache::new(config.cache.max_entries)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    // Always surfaces failures; a zero `freshness` bypasses the cache.
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<&QueryParams>,
        freshness: Duration,
    ) -> Result<T> {
        let url = build_url(&self.base_url, endpoint, params);

        if let Some(body) = self.cache.get(&url)? {
            tracing::debug!(%url, "Serving cached provider response");
            return Ok(serde_json::from_value(body)?);
        }

        tracing::debug!(%url, "Fetching from provider");
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error_body = serde_json::from_str::<Value>(&text)
                .unwrap_or_else(|_| Value::Object(Default::default()));
            tracing::error!(
                endpoint,
                status = status.as_u16(),
                error_body = %error_body,
                "CoinGecko API error"
            );
            return Err(provider_error(status, &error_body));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        let decoded = serde_json::from_value::<T>(body.clone())?;
        self.cache.insert(&url, body, freshness)?;
        Ok(decoded)
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<&QueryParams>,
    ) -> Result<T> {
        self.fetch_resource(endpoint, params, DEFAULT_FRESHNESS).await
    }
}

// Fields are read independently; a mistyped sibling must not mask the error code.
pub(crate) fn provider_error(status: StatusCode, body: &Value) -> CoinPulseError {
    let code = body.pointer("/status/error_code");
    let plan_required = code.and_then(Value::as_i64) == Some(PLAN_REQUIRED_ERROR_CODE)
        || code.and_then(Value::as_f64) == Some(PLAN_REQUIRED_ERROR_CODE as f64);
    if plan_required {
        return CoinPulseError::PlanRequired;
    }

    let message = ["/status/error_message", "/error"]
        .into_iter()
        .filter_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
        .find(|m| !m.is_empty())
        .or_else(|| status.canonical_reason())
        .unwrap_or("Something went wrong");

    CoinPulseError::provider(status.as_u16(), message)
}
