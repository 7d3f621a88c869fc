//! Time-expiring, size-bounded response cache.
//!
//! A single mutex around the map is sufficient at the capacity this cache
//! runs at (~100 entries); operations are O(capacity) at worst and the
//! cache is never the throughput bottleneck next to an external
//! completion call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chol_core::ResponsePayload;

struct CacheEntry {
    payload: ResponsePayload,
    inserted_at: Instant,
}

/// Bounded in-process cache mapping derived keys to response payloads.
///
/// Entries expire lazily: a read past the TTL treats the entry as absent.
/// Inserting beyond capacity evicts the entry with the oldest insertion
/// time (ties broken by key order, so eviction is deterministic).
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    capacity: usize,
    ttl: Duration,
}

impl ResponseCache {
    pub const DEFAULT_CAPACITY: usize = 100;
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
            ttl,
        }
    }

    /// Return a copy of the payload under `key`, if present and fresh.
    pub fn get(&self, key: &str) -> Option<ResponsePayload> {
        self.get_at(key, Instant::now())
    }

    /// Insert or overwrite `key`, evicting the oldest entry if over capacity.
    pub fn put(&self, key: &str, payload: ResponsePayload) {
        self.put_at(key, payload, Instant::now());
    }

    /// Current entry count (expired-but-unswept entries included).
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<ResponsePayload> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.payload.clone())
            }
            Some(_) => {
                // Expired: drop it on read rather than sweeping in the background.
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub(crate) fn put_at(&self, key: &str, payload: ResponsePayload, now: Instant) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                inserted_at: now,
            },
        );

        while entries.len() > self.capacity {
            let oldest = entries
                .iter()
                .min_by(|(ka, a), (kb, b)| {
                    a.inserted_at.cmp(&b.inserted_at).then_with(|| ka.cmp(kb))
                })
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chol_core::Source;

    fn payload(text: &str) -> ResponsePayload {
        ResponsePayload::new(text, Source::Ai)
    }

    #[test]
    fn test_get_returns_fresh_entry() {
        let cache = ResponseCache::default();
        cache.put("k", payload("answer"));
        assert_eq!(cache.get("k").unwrap().text, "answer");
    }

    #[test]
    fn test_unknown_key_is_absent() {
        let cache = ResponseCache::default();
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let ttl = Duration::from_secs(3600);
        let cache = ResponseCache::new(100, ttl);
        let t0 = Instant::now();
        cache.put_at("k", payload("answer"), t0);

        // One second before the timeout: hit.
        assert!(cache.get_at("k", t0 + ttl - Duration::from_secs(1)).is_some());
        // At and past the timeout: miss.
        assert!(cache.get_at("k", t0 + ttl + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_expired_entry_removed_on_read() {
        let cache = ResponseCache::new(100, Duration::from_secs(10));
        let t0 = Instant::now();
        cache.put_at("k", payload("stale"), t0);
        assert!(cache.get_at("k", t0 + Duration::from_secs(11)).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_eviction_removes_single_oldest() {
        let cache = ResponseCache::new(3, Duration::from_secs(3600));
        let t0 = Instant::now();
        cache.put_at("a", payload("a"), t0);
        cache.put_at("b", payload("b"), t0 + Duration::from_secs(1));
        cache.put_at("c", payload("c"), t0 + Duration::from_secs(2));
        cache.put_at("d", payload("d"), t0 + Duration::from_secs(3));

        assert_eq!(cache.len(), 3);
        assert!(cache.get_at("a", t0 + Duration::from_secs(4)).is_none());
        for key in ["b", "c", "d"] {
            assert!(cache.get_at(key, t0 + Duration::from_secs(4)).is_some());
        }
    }

    #[test]
    fn test_eviction_tie_broken_by_key_order() {
        let cache = ResponseCache::new(2, Duration::from_secs(3600));
        let t0 = Instant::now();
        cache.put_at("b", payload("b"), t0);
        cache.put_at("a", payload("a"), t0);
        cache.put_at("c", payload("c"), t0 + Duration::from_secs(1));

        // "a" and "b" share a timestamp; the lexicographically smaller key goes.
        assert!(cache.get_at("a", t0 + Duration::from_secs(2)).is_none());
        assert!(cache.get_at("b", t0 + Duration::from_secs(2)).is_some());
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let cache = ResponseCache::new(5, Duration::from_secs(3600));
        let t0 = Instant::now();
        for i in 0u64..20 {
            cache.put_at(&format!("key-{i}"), payload("x"), t0 + Duration::from_secs(i));
            assert!(cache.len() <= 5);
        }
    }

    #[test]
    fn test_overwrite_same_key_keeps_size() {
        let cache = ResponseCache::new(10, Duration::from_secs(3600));
        cache.put("k", payload("first"));
        cache.put("k", payload("second"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().text, "second");
    }
}
