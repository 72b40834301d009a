use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub const DEFAULT_QUOTE_API_URL: &str = "https://data.infoway.io";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Built web client to serve as the router fallback.
    pub static_dir: Option<String>,
    pub quote_api_key: String,
    pub quote_api_url: String,
    pub change_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("SB_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()
            .context("Invalid SB_LISTEN_ADDR")?;
        let db_path = std::env::var("SB_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = parse_origins(
            &std::env::var("SB_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms = env_millis("SB_REQUEST_TIMEOUT_MS", 30_000);
        let static_dir = std::env::var("SB_STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let quote_api_key = std::env::var("INFOWAY_API_KEY").unwrap_or_default();
        let quote_api_url =
            std::env::var("SB_QUOTE_API_URL").unwrap_or_else(|_| DEFAULT_QUOTE_API_URL.into());
        let change_ttl_ms = env_millis("SB_CHANGE_TTL_MS", 60_000);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            quote_api_key,
            quote_api_url,
            change_ttl: Duration::from_millis(change_ttl_ms),
        })
    }
}

fn env_millis(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
