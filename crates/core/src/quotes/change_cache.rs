//! Process-wide percent-change cache.
//!
//! Entries never expire on their own: staleness is decided at read time by
//! comparing `fetched_at` with the caller's clock, and a stale entry is simply
//! overwritten by the next successful fetch. Two concurrent requests may both
//! see a symbol as stale and both write it; the last write wins for the
//! value, while an entry's `fetched_at` never moves backwards.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::warn;

use super::quotes_model::ChangeCacheEntry;

pub struct ChangeCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, ChangeCacheEntry>>,
}

impl ChangeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, ChangeCacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Change cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Fresh iff the entry is younger than the TTL. A timestamp in the future
    /// (clock stepped back) counts as fresh.
    fn is_fresh(&self, entry: &ChangeCacheEntry, now: DateTime<Utc>) -> bool {
        match (now - entry.fetched_at).to_std() {
            Ok(age) => age < self.ttl,
            Err(_) => true,
        }
    }

    /// Symbols with no entry or an entry at least `ttl` old, in input order.
    pub fn stale_symbols(&self, symbols: &[String], now: DateTime<Utc>) -> Vec<String> {
        let entries = self.lock_entries();
        symbols
            .iter()
            .filter(|symbol| {
                entries
                    .get(symbol.as_str())
                    .map_or(true, |entry| !self.is_fresh(entry, now))
            })
            .cloned()
            .collect()
    }

    /// Replaces the cached figure for `symbol`. The stored timestamp is the
    /// later of the existing one and `fetched_at`.
    pub fn store(&self, symbol: &str, percent_change: String, fetched_at: DateTime<Utc>) {
        let mut entries = self.lock_entries();
        let fetched_at = entries
            .get(symbol)
            .map_or(fetched_at, |existing| existing.fetched_at.max(fetched_at));
        entries.insert(
            symbol.to_string(),
            ChangeCacheEntry {
                percent_change,
                fetched_at,
            },
        );
    }

    /// Cached figure regardless of age.
    pub fn percent_change(&self, symbol: &str) -> Option<String> {
        self.lock_entries()
            .get(symbol)
            .map(|entry| entry.percent_change.clone())
    }

    pub fn get(&self, symbol: &str) -> Option<ChangeCacheEntry> {
        self.lock_entries().get(symbol).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
