//! Exchange trading hours.
//!
//! A pure time-of-day check against the exchange's civil time, obtained by a
//! fixed UTC offset. Weekends and exchange holidays are not modelled: a
//! Saturday at 10:00 counts as open.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A continuous trading window in minutes since local midnight, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingSession {
    pub open: u32,
    pub close: u32,
}

impl TradingSession {
    pub const fn new(open: u32, close: u32) -> Self {
        Self { open, close }
    }

    pub fn contains(&self, minute: u32) -> bool {
        (self.open..=self.close).contains(&minute)
    }
}

/// Where the exchange day stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    PreMarket,
    MorningSession,
    LunchBreak,
    AfternoonSession,
    Closed,
}

impl MarketStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::MorningSession | Self::AfternoonSession)
    }
}

/// Trading calendar of a two-session exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketHours {
    pub utc_offset_secs: i32,
    pub morning: TradingSession,
    pub afternoon: TradingSession,
}

impl MarketHours {
    /// Shanghai/Shenzhen A-shares: UTC+8, 09:00-11:30 and 13:00-15:00.
    pub const fn cn_a_share() -> Self {
        Self {
            utc_offset_secs: 8 * 3600,
            morning: TradingSession::new(540, 690),
            afternoon: TradingSession::new(780, 900),
        }
    }

    /// Exchange civil time at `now`.
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveTime {
        (now + Duration::seconds(i64::from(self.utc_offset_secs)))
            .naive_utc()
            .time()
    }

    fn local_minute(&self, now: DateTime<Utc>) -> u32 {
        let local = self.local_time(now);
        local.hour() * 60 + local.minute()
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> MarketStatus {
        let minute = self.local_minute(now);
        if minute < self.morning.open {
            MarketStatus::PreMarket
        } else if self.morning.contains(minute) {
            MarketStatus::MorningSession
        } else if minute < self.afternoon.open {
            MarketStatus::LunchBreak
        } else if self.afternoon.contains(minute) {
            MarketStatus::AfternoonSession
        } else {
            MarketStatus::Closed
        }
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now).is_open()
    }
}

impl Default for MarketHours {
    fn default() -> Self {
        Self::cn_a_share()
    }
}
