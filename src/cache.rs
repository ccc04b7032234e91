// src/cache.rs
// Time-windowed memoization of aggregation results, keyed by the query
// configuration. The clock is injected so TTL expiry is testable.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ingest::types::NewsRecord;

/// Uniform lifetime of a cached result set.
pub const CACHE_TTL_SECS: u64 = 24 * 3600;

pub trait Clock: Send + Sync {
    fn now_unix(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    records: Vec<NewsRecord>,
    fetched_at: u64,
}

pub struct AggregationCache {
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl AggregationCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, CACHE_TTL_SECS)
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Live entry for the key, if any. Expired entries are not returned
    /// here (but stay stored for `last_known`).
    pub fn get(&self, key: &str) -> Option<Vec<NewsRecord>> {
        let now = self.clock.now_unix();
        let entries = self.entries.read().expect("cache lock poisoned");
        let entry = entries.get(key)?;
        if now.saturating_sub(entry.fetched_at) >= self.ttl_secs {
            return None;
        }
        Some(entry.records.clone())
    }

    /// Most recent entry for the key regardless of expiry. Feeds the
    /// fallback policy when a fresh fetch comes back empty.
    pub fn last_known(&self, key: &str) -> Option<Vec<NewsRecord>> {
        let entries = self.entries.read().expect("cache lock poisoned");
        entries.get(key).map(|e| e.records.clone())
    }

    /// Store a result set stamped with the injected clock. Replaces any
    /// previous entry for the key in one write, so readers see either the
    /// old complete sequence or the new one.
    pub fn put(&self, key: &str, records: Vec<NewsRecord>) {
        let entry = CacheEntry {
            records,
            fetched_at: self.clock.now_unix(),
        };
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(key.to_string(), entry);
    }
}
