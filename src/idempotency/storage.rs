use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// TTL applied when construction is given a zero or negative value.
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Store statistics for monitoring.
#[derive(Debug, Default)]
pub struct StoreStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub inserts: AtomicU64,
    pub evictions: AtomicU64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evictions(&self, count: u64) {
        self.evictions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn get_hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn get_misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn get_inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    pub fn get_evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.get_hits();
        let total = hits + self.get_misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

/// Outcome of a completed send, as replayed to callers of `get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSend {
    pub succeeded: bool,
    pub message_id: String,
}

#[derive(Debug, Clone)]
struct Entry {
    succeeded: bool,
    message_id: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-memory idempotency store. A key set within the TTL window replays the
/// cached outcome; expired entries behave as absent regardless of when they
/// are physically removed.
pub struct IdempotencyStore {
    entries: RwLock<HashMap<String, Entry>>,
    ttl_seconds: i64,
    stats: Arc<StoreStats>,
}

impl IdempotencyStore {
    pub fn new(ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds <= 0 {
            DEFAULT_TTL_SECONDS
        } else {
            ttl_seconds
        };
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_seconds,
            stats: Arc::new(StoreStats::new()),
        }
    }

    /// Returns the effective TTL in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Returns store statistics.
    pub fn stats(&self) -> Arc<StoreStats> {
        self.stats.clone()
    }

    /// Returns the cached outcome for `key` if present and not expired.
    pub fn get(&self, key: &str) -> Option<CachedSend> {
        let now = Utc::now();
        let entries = self.entries.read().expect("idempotency map poisoned");
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.record_hit();
                Some(CachedSend {
                    succeeded: entry.succeeded,
                    message_id: entry.message_id.clone(),
                })
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Inserts or overwrites the outcome for `key`. Last writer wins.
    pub fn set(&self, key: &str, succeeded: bool, message_id: &str) {
        let entry = Entry {
            succeeded,
            message_id: message_id.to_string(),
            expires_at: Utc::now() + Duration::seconds(self.ttl_seconds),
        };
        let mut entries = self.entries.write().expect("idempotency map poisoned");
        entries.insert(key.to_string(), entry);
        self.stats.record_insert();
    }

    /// Removes expired entries and returns how many were dropped. Expiry is
    /// already enforced at read time; this only bounds memory.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().expect("idempotency map poisoned");
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before - entries.len();
        self.stats.record_evictions(purged as u64);
        purged
    }

    /// Number of physically retained entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().expect("idempotency map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_ttl_corrected_to_default() {
        assert_eq!(IdempotencyStore::new(0).ttl_seconds(), DEFAULT_TTL_SECONDS);
        assert_eq!(IdempotencyStore::new(-5).ttl_seconds(), DEFAULT_TTL_SECONDS);
        assert_eq!(IdempotencyStore::new(60).ttl_seconds(), 60);
    }

    #[test]
    fn test_store_stats() {
        let stats = StoreStats::new();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.get_hits(), 2);
        assert_eq!(stats.get_misses(), 1);
        assert!((stats.hit_rate() - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_get_counts_hits_and_misses() {
        let store = IdempotencyStore::new(60);
        assert!(store.get("absent").is_none());
        store.set("k", true, "mid-1");
        assert!(store.get("k").is_some());

        let stats = store.stats();
        assert_eq!(stats.get_hits(), 1);
        assert_eq!(stats.get_misses(), 1);
        assert_eq!(stats.get_inserts(), 1);
    }
}
