//! Typed REST client for the stock board server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use stockboard_core::boards::{Board, BoardStockRecord};
use stockboard_core::markings::{Marking, SaveMarking, StockMarking};
use stockboard_core::quotes::{EnrichedQuote, PopularStock};
use stockboard_core::summaries::MarketSummary;
use stockboard_core::users::User;
use stockboard_market_data::{KlineSeries, SymbolInfo};
use tracing::debug;

use crate::errors::ClientError;
use crate::models::MarketStatusInfo;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can answer a batched quote request.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<EnrichedQuote>, ClientError>;
}

#[derive(Deserialize)]
struct ResponseEnvelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    name: &'a str,
    password: &'a str,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_raw(
        &self,
        request: RequestBuilder,
    ) -> Result<ResponseEnvelope<serde_json::Value>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), "Server response");

        let envelope: ResponseEnvelope<serde_json::Value> = serde_json::from_str(&body)
            .map_err(|e| {
                if status.is_success() {
                    ClientError::Decode(e.to_string())
                } else {
                    ClientError::Api {
                        status: status.as_u16(),
                        message: body.clone(),
                    }
                }
            })?;

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .error
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }
        Ok(envelope)
    }

    /// Sends and decodes `data`; a missing `data` decodes from `null`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let envelope = self.send_raw(request).await?;
        serde_json::from_value(envelope.data.unwrap_or(serde_json::Value::Null))
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_unit(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send_raw(request).await.map(|_| ())
    }

    // Boards

    pub async fn list_boards(&self) -> Result<Vec<Board>, ClientError> {
        self.send(self.client.get(self.url("/boards"))).await
    }

    pub async fn create_board(&self, title: &str) -> Result<Board, ClientError> {
        self.send(
            self.client
                .post(self.url("/boards"))
                .json(&json!({ "title": title })),
        )
        .await
    }

    pub async fn delete_board(&self, board_id: i32) -> Result<(), ClientError> {
        self.send_unit(self.client.delete(self.url(&format!("/boards/{}", board_id))))
            .await
    }

    pub async fn add_stock(
        &self,
        board_id: i32,
        symbol: &str,
        name: &str,
    ) -> Result<BoardStockRecord, ClientError> {
        self.send(
            self.client
                .post(self.url(&format!("/boards/{}/stocks", board_id)))
                .json(&json!({ "symbol": symbol, "name": name })),
        )
        .await
    }

    pub async fn remove_stock(&self, board_id: i32, symbol: &str) -> Result<(), ClientError> {
        let path = format!("/boards/{}/stocks/{}", board_id, urlencoding::encode(symbol));
        self.send_unit(self.client.delete(self.url(&path))).await
    }

    pub async fn board_summary(&self, board_id: i32) -> Result<Option<MarketSummary>, ClientError> {
        self.send(
            self.client
                .get(self.url(&format!("/boards/{}/summary", board_id))),
        )
        .await
    }

    // Stocks

    pub async fn get_kline(
        &self,
        symbols: &[String],
        kline_type: u32,
        kline_num: u32,
    ) -> Result<Vec<KlineSeries>, ClientError> {
        self.send(self.client.get(self.url("/stocks/kline")).query(&[
            ("symbols", symbols.join(",")),
            ("type", kline_type.to_string()),
            ("num", kline_num.to_string()),
        ]))
        .await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SymbolInfo>, ClientError> {
        self.send(
            self.client
                .get(self.url("/stocks/search"))
                .query(&[("q", query)]),
        )
        .await
    }

    pub async fn popular_stocks(&self) -> Result<Vec<PopularStock>, ClientError> {
        self.send(self.client.get(self.url("/stocks/popular"))).await
    }

    // Auth

    pub async fn register(&self, name: &str, password: &str) -> Result<User, ClientError> {
        self.send(
            self.client
                .post(self.url("/auth/register"))
                .json(&CredentialsBody { name, password }),
        )
        .await
    }

    pub async fn login(&self, name: &str, password: &str) -> Result<User, ClientError> {
        self.send(
            self.client
                .post(self.url("/auth/login"))
                .json(&CredentialsBody { name, password }),
        )
        .await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ClientError> {
        let path = format!("/auth/me/{}", urlencoding::encode(user_id));
        self.send(self.client.get(self.url(&path))).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.send(self.client.get(self.url("/markings/users/all")))
            .await
    }

    // Markings

    pub async fn get_markings(
        &self,
        board_id: i32,
        symbol: &str,
    ) -> Result<Vec<StockMarking>, ClientError> {
        let path = format!("/markings/{}/{}", board_id, urlencoding::encode(symbol));
        self.send(self.client.get(self.url(&path))).await
    }

    /// `None` when the save cleared the marking (both prices empty).
    pub async fn save_marking(
        &self,
        marking: &SaveMarking,
    ) -> Result<Option<Marking>, ClientError> {
        self.send(self.client.post(self.url("/markings")).json(marking))
            .await
    }

    pub async fn delete_marking(
        &self,
        board_id: i32,
        symbol: &str,
        user_id: &str,
    ) -> Result<(), ClientError> {
        let path = format!(
            "/markings/{}/{}/{}",
            board_id,
            urlencoding::encode(symbol),
            urlencoding::encode(user_id)
        );
        self.send_unit(self.client.delete(self.url(&path))).await
    }

    // Summaries and market

    pub async fn global_summary(&self) -> Result<MarketSummary, ClientError> {
        self.send(self.client.get(self.url("/summaries/global")))
            .await
    }

    pub async fn market_status(&self) -> Result<MarketStatusInfo, ClientError> {
        self.send(self.client.get(self.url("/market/status"))).await
    }
}

#[async_trait]
impl QuoteFetcher for ApiClient {
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<EnrichedQuote>, ClientError> {
        let quotes: Option<Vec<EnrichedQuote>> = self
            .send(
                self.client
                    .get(self.url("/stocks/quotes"))
                    .query(&[("symbols", symbols.join(","))]),
            )
            .await?;
        Ok(quotes.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::Value;
    use std::collections::HashMap;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn fake_server() -> Router {
        let api = Router::new()
            .route(
                "/stocks/quotes",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let data: Vec<Value> = q
                        .get("symbols")
                        .map(|s| s.split(',').map(str::to_string).collect::<Vec<_>>())
                        .unwrap_or_default()
                        .into_iter()
                        .map(|s| {
                            json!({
                                "s": s, "t": 1, "p": "12.30", "v": "1", "vw": "12.3", "td": 0,
                                "pc": "-0.45"
                            })
                        })
                        .collect();
                    Json(json!({"success": true, "data": data}))
                }),
            )
            .route(
                "/boards/{id}/stocks",
                post(|Path(id): Path<i32>, Json(body): Json<Value>| async move {
                    if id != 1 {
                        return (
                            StatusCode::NOT_FOUND,
                            Json(json!({
                                "success": false,
                                "code": 404,
                                "error": "Board not found"
                            })),
                        );
                    }
                    (
                        StatusCode::OK,
                        Json(json!({"success": true, "data": {
                            "id": 7, "boardId": id, "symbol": body["symbol"], "name": body["name"],
                            "createdAt": "2024-03-04T02:00:00"
                        }})),
                    )
                }),
            )
            .route(
                "/markings",
                post(|| async { Json(json!({"success": true, "message": "Marking removed"})) }),
            )
            .route("/broken", get(|| async { "not json" }));
        Router::new().nest("/api", api)
    }

    #[tokio::test]
    async fn test_get_quotes_decodes_enriched_records() {
        let client = ApiClient::new(&spawn_server(fake_server()).await).unwrap();
        let quotes = client
            .get_quotes(&["600519.SH".to_string(), "000858.SZ".to_string()])
            .await
            .unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].trade.symbol, "000858.SZ");
        assert_eq!(quotes[0].trade.price, "12.30");
        assert_eq!(quotes[0].percent_change, "-0.45");
    }

    #[tokio::test]
    async fn test_error_envelope_becomes_api_error() {
        let client = ApiClient::new(&spawn_server(fake_server()).await).unwrap();
        let err = client.add_stock(2, "600519.SH", "贵州茅台").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            ClientError::Api { ref message, .. } if message == "Board not found"
        ));

        let record = client.add_stock(1, "600519.SH", "贵州茅台").await.unwrap();
        assert_eq!(record.symbol, "600519.SH");
    }

    #[tokio::test]
    async fn test_cleared_marking_has_no_data() {
        let client = ApiClient::new(&spawn_server(fake_server()).await).unwrap();
        let saved = client
            .save_marking(&SaveMarking {
                user_id: "u_alice001".to_string(),
                board_id: 1,
                symbol: "600519.SH".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(saved.is_none());
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let base = spawn_server(fake_server()).await;
        let client = ApiClient::new(&base).unwrap();
        let err = client
            .send::<Value>(client.client.get(client.url("/broken")))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:3001/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001/api");
    }
}
