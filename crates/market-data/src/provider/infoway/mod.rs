//! Infoway market data provider implementation.
//!
//! This module provides A-share market data from the Infoway API:
//! - Live trades via `GET /stock/batch_trade/{codes}`
//! - K-line bars via `POST /stock/v2/batch_kline`
//! - Symbol list via `GET /common/basic/symbols?type=STOCK_CN`
//!
//! All endpoints authenticate with an `apiKey` header and wrap their payload
//! in a `{ "data": [...] }` envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{KlineSeries, SymbolInfo, TradeQuote};
use crate::provider::QuoteProvider;

pub const DEFAULT_BASE_URL: &str = "https://data.infoway.io";
const PROVIDER_ID: &str = "INFOWAY";
const SYMBOL_LIST_TYPE: &str = "STOCK_CN";

// ============================================================================
// API Request/Response Structures
// ============================================================================

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<Vec<T>>,
}

/// Body of the batched K-line request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KlineRequest<'a> {
    codes: &'a str,
    kline_type: u32,
    kline_num: u32,
}

// ============================================================================
// InfowayProvider
// ============================================================================

/// Infoway quote provider.
pub struct InfowayProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl InfowayProvider {
    /// Create a provider against the public Infoway endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a provider against a custom base URL (proxies, tests).
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a prepared request and decode the `data` array of the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<Vec<T>, MarketDataError> {
        debug!("Infoway request: {}", endpoint);

        let response = request
            .header("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })?;

        parse_envelope(&body)
    }
}

/// Decode the `data` array of an envelope; a missing or null `data` is empty.
fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, MarketDataError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;
    Ok(envelope.data.unwrap_or_default())
}

#[async_trait]
impl QuoteProvider for InfowayProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn batch_trade(&self, symbols: &[String]) -> Result<Vec<TradeQuote>, MarketDataError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let codes = symbols.join(",");
        let endpoint = format!("/stock/batch_trade/{}", urlencoding::encode(&codes));
        let request = self.client.get(self.url(&endpoint));
        self.send(request, &endpoint).await
    }

    async fn batch_kline(
        &self,
        symbols: &[String],
        kline_type: u32,
        kline_num: u32,
    ) -> Result<Vec<KlineSeries>, MarketDataError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let codes = symbols.join(",");
        let endpoint = "/stock/v2/batch_kline";
        let request = self.client.post(self.url(endpoint)).json(&KlineRequest {
            codes: &codes,
            kline_type,
            kline_num,
        });
        self.send(request, endpoint).await
    }

    async fn symbol_list(&self) -> Result<Vec<SymbolInfo>, MarketDataError> {
        let endpoint = "/common/basic/symbols";
        let request = self
            .client
            .get(self.url(endpoint))
            .query(&[("type", SYMBOL_LIST_TYPE)]);
        self.send(request, endpoint).await
    }
}
