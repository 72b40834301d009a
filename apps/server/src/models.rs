//! Response shapes shared by every route.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockboard_core::market_hours::MarketStatus;

/// Success envelope: `{ success: true, data?, message? }`.
#[derive(Serialize, Debug)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatusView {
    pub open: bool,
    pub status: MarketStatus,
    /// Exchange-local wall time, `HH:MM`.
    pub local_time: String,
}

#[derive(Serialize, Debug)]
pub struct HealthView {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
