//! Bounded TTL cache for list reads

use crate::categories::CacheCategory;
use crate::entry::CacheEntry;
use indexmap::IndexMap;
use std::time::Duration;
use thingsctl_config::CacheSettings;
use thingsctl_utils::tracing::cache_event;
use tokio::time::Instant;

/// In-memory cache keyed by opaque strings.
///
/// Insertion order is tracked so that, at capacity, storing a new key
/// evicts the oldest-inserted entry. Overwriting a key keeps its slot.
#[derive(Debug)]
pub struct ResponseCache<T> {
    entries: IndexMap<String, CacheEntry<T>>,
    capacity: usize,
    default_ttl: Duration,
}

impl<T: Clone> ResponseCache<T> {
    /// Capacity is clamped to at least one entry
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
            default_ttl,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.capacity, settings.ttl())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Return a live entry, dropping it if it has expired
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = Instant::now();
        let Some(entry) = self.entries.get(key) else {
            cache_event(key, false);
            return None;
        };
        if entry.is_expired_at(now) {
            self.entries.shift_remove(key);
            tracing::trace!(key = %key, "cache_expired");
            cache_event(key, false);
            return None;
        }
        cache_event(key, true);
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    pub fn set(&mut self, key: impl Into<String>, data: T, ttl: Duration) {
        let key = key.into();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                tracing::debug!(key = %evicted, "cache_evicted");
            }
        }
        self.entries.insert(key, CacheEntry::new(data, ttl));
    }

    /// Store with the cache's default TTL
    pub fn set_default(&mut self, key: impl Into<String>, data: T) {
        let ttl = self.default_ttl;
        self.set(key, data, ttl);
    }

    pub fn delete(&mut self, key: &str) {
        self.entries.shift_remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Same expiry semantics as `get`
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stored entries, expired ones included until they are read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every list that contains to-dos
    pub fn invalidate_todo_caches(&mut self) {
        for category in CacheCategory::TODO_BEARING {
            self.delete(&category.key());
        }
        tracing::debug!("todo caches invalidated");
    }

    /// Drop the project list and every to-do list
    pub fn invalidate_project_caches(&mut self) {
        self.delete(&CacheCategory::Projects.key());
        self.invalidate_todo_caches();
    }
}

impl<T: Clone> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::from_settings(&CacheSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const TTL: Duration = Duration::from_millis(1_000);

    fn filled_with_all_categories() -> ResponseCache<String> {
        let mut cache = ResponseCache::new(100, TTL);
        for category in CacheCategory::ALL {
            cache.set_default(category.key(), category.to_string());
        }
        cache
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_returns_value_within_ttl() {
        let mut cache = ResponseCache::new(10, TTL);
        cache.set("k", "v".to_string(), TTL);

        tokio::time::advance(Duration::from_millis(999)).await;
        assert_eq!(cache.get("k"), Some("v".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_absent_and_evicted_on_read() {
        let mut cache = ResponseCache::new(10, TTL);
        cache.set("k", 1u32, Duration::from_millis(100));

        tokio::time::advance(Duration::from_millis(101)).await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
        assert!(!cache.has("k"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_entry_ttl_overrides_default() {
        let mut cache = ResponseCache::new(10, Duration::from_secs(60));
        cache.set("short", 1u32, Duration::from_millis(10));
        cache.set_default("long", 2u32);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut cache = ResponseCache::new(3, TTL);
        cache.set_default("a", 1);
        cache.set_default("b", 2);
        cache.set_default("c", 3);

        cache.set_default("d", 4);
        assert_eq!(cache.len(), 3);
        assert!(!cache.has("a"));
        assert!(cache.has("b"));
        assert!(cache.has("d"));
    }

    #[test]
    fn test_reads_do_not_refresh_insertion_order() {
        let mut cache = ResponseCache::new(2, TTL);
        cache.set_default("a", 1);
        cache.set_default("b", 2);
        assert_eq!(cache.get("a"), Some(1));

        cache.set_default("c", 3);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_updating_existing_key_never_evicts() {
        let mut cache = ResponseCache::new(2, TTL);
        cache.set_default("a", 1);
        cache.set_default("b", 2);

        cache.set_default("a", 10);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(10));
        assert_eq!(cache.get("b"), Some(2));

        // "a" kept its slot, so it is still the oldest
        cache.set_default("c", 3);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_delete_and_clear() {
        let mut cache = filled_with_all_categories();
        cache.delete("things:inbox");
        assert!(!cache.has("things:inbox"));
        assert_eq!(cache.len(), 7);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_todo_invalidation_spares_structure_lists() {
        let mut cache = filled_with_all_categories();
        cache.invalidate_todo_caches();

        for category in CacheCategory::TODO_BEARING {
            assert!(!cache.has(&category.key()), "{category} should be gone");
        }
        assert!(cache.has("things:projects"));
        assert!(cache.has("things:areas"));
        assert!(cache.has("things:tags"));
    }

    #[test]
    fn test_project_invalidation_includes_todo_lists() {
        let mut cache = filled_with_all_categories();
        cache.invalidate_project_caches();

        assert_eq!(cache.len(), 2);
        assert!(cache.has("things:areas"));
        assert!(cache.has("things:tags"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = ResponseCache::new(0, TTL);
        cache.set_default("a", 1);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.get("a"), Some(1));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn with_captured_log(f: impl FnOnce()) -> Vec<String> {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        log.lines()
    }

    #[test]
    fn test_absent_key_is_logged_as_miss() {
        let lines = with_captured_log(|| {
            let mut cache: ResponseCache<u32> = ResponseCache::new(4, TTL);
            assert_eq!(cache.get("things:inbox"), None);
            cache.set_default("things:inbox", 1);
            assert_eq!(cache.get("things:inbox"), Some(1));
        });

        let misses: Vec<_> = lines.iter().filter(|l| l.contains("cache_miss")).collect();
        let hits: Vec<_> = lines.iter().filter(|l| l.contains("cache_hit")).collect();
        assert_eq!(misses.len(), 1);
        assert!(misses[0].contains("things:inbox"));
        assert_eq!(hits.len(), 1);
    }
}
