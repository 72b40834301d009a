use std::time::Duration;

use stockboard_client::DEFAULT_POLL_INTERVAL;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001/api";

pub struct Config {
    pub server_url: String,
    pub poll_interval: Duration,
    /// Highlights this user's own markings in the table.
    pub user_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let server_url = lookup("SB_SERVER_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let poll_interval = lookup("SB_POLL_INTERVAL_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let user_id = lookup("SB_USER_ID").filter(|s| !s.trim().is_empty());

        Self {
            server_url,
            poll_interval,
            user_id,
        }
    }
}
