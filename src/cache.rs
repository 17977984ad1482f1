//! A small bounded memoization cache.
//!
//! Lookups take a shared lock, so concurrent hits never block each other.
//! On a miss the value is computed without holding any lock and inserted
//! under the exclusive lock after re-checking the key; when two threads race
//! on the same key both compute, the first insert wins and the other result
//! is dropped. Once an insert pushes the total size over the bound, other
//! entries are evicted in no particular order until it fits again.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use crate::consts::DEFAULT_CACHE_SIZE;

/// Logical size of a cached value. The default is one unit.
///
/// The size must be positive and must not change for a given value.
pub trait Sizer {
    fn size(&self) -> u64 {
        1
    }
}

impl<T: Sizer + ?Sized> Sizer for Arc<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}

struct Entries<K, V> {
    map: HashMap<K, V>,
    size: u64,
}

impl<K: Hash + Eq, V: Sizer> Entries<K, V> {
    fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(value) = self.map.remove(key) {
            self.size -= value.size();
        }
    }
}

/// A thread-safe, size-bounded get-or-fill cache.
pub struct Cache<K, V> {
    max_size: u64,
    entries: RwLock<Entries<K, V>>,
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Cache")
            .field("max_size", &self.max_size)
            .field("size", &entries.size)
            .field("len", &entries.map.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V: Clone + Sizer> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V: Clone + Sizer> Cache<K, V> {
    /// Creates a cache bounded by [`DEFAULT_CACHE_SIZE`] units.
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_CACHE_SIZE)
    }

    /// Creates a cache bounded by `max_size` units.
    pub fn with_max_size(max_size: u64) -> Self {
        Self {
            max_size,
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                size: 0,
            }),
        }
    }

    /// Returns the value cached for `key`, calling `fill` to compute and
    /// insert it when missing.
    pub fn get<Q>(&self, key: &Q, fill: impl FnOnce(&Q) -> V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(value) = entries.map.get(key) {
                return value.clone();
            }
        }

        let value = fill(key);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.map.get(key) {
            // filled concurrently by another thread
            return existing.clone();
        }
        entries.size += value.size();
        entries.map.insert(key.to_owned(), value.clone());

        while entries.size > self.max_size {
            // the new entry goes last, and only if it alone exceeds the bound
            let victim = entries
                .map
                .keys()
                .find(|k| <K as Borrow<Q>>::borrow(k) != key)
                .or_else(|| entries.map.keys().next())
                .cloned();
            let Some(victim) = victim else {
                break;
            };
            entries.remove::<K>(&victim);
            log::trace!("evicted cache entry, {} of {} units in use", entries.size, self.max_size);
        }
        value
    }

    /// Removes the entry for `key`. Does nothing if there is none.
    pub fn evict<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }

    /// Removes every entry.
    pub fn flush(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        log::trace!("flushing {} cache entries", entries.map.len());
        entries.map.clear();
        entries.size = 0;
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .len()
    }

    /// Reports whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total logical size of the cached entries.
    pub fn size(&self) -> u64 {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .size
    }

    /// The logical size bound.
    pub const fn max_size(&self) -> u64 {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Unit(u32);

    impl Sizer for Unit {}

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Weighted(u64);

    impl Sizer for Weighted {
        fn size(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_get_fills_once() {
        let cache: Cache<String, Unit> = Cache::new();
        let calls = AtomicUsize::new(0);
        let fill = |_: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            Unit(7)
        };

        assert_eq!(cache.get("a", fill), Unit(7));
        assert_eq!(cache.get("a", fill), Unit(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_evict_and_flush() {
        let cache: Cache<String, Unit> = Cache::new();
        cache.get("a", |_| Unit(1));
        cache.get("b", |_| Unit(2));
        assert_eq!(cache.len(), 2);

        cache.evict("a");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), 1);
        cache.evict("missing");
        assert_eq!(cache.len(), 1);

        // evicted keys are filled again
        assert_eq!(cache.get("a", |_| Unit(3)), Unit(3));

        cache.flush();
        assert!(cache.is_empty());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_bounded_by_count() {
        let cache: Cache<u32, Unit> = Cache::with_max_size(8);
        for i in 0..100 {
            assert_eq!(cache.get(&i, |&k| Unit(k)), Unit(i));
            assert!(cache.len() <= 8);
            assert!(cache.size() <= cache.max_size());
        }
        assert_eq!(cache.len(), 8);
    }

    #[test]
    fn test_new_entry_survives_full_cache() {
        let cache: Cache<u32, Unit> = Cache::with_max_size(4);
        let calls = AtomicUsize::new(0);
        let fill = |&k: &u32| {
            calls.fetch_add(1, Ordering::SeqCst);
            Unit(k)
        };

        for i in 0..4 {
            cache.get(&i, fill);
        }
        for i in 4..1000 {
            cache.get(&i, fill);
            assert_eq!(cache.len(), 4);
            // the entry just inserted is still cached
            cache.get(&i, fill);
            assert_eq!(calls.load(Ordering::SeqCst), i as usize + 1, "key {i} was evicted");
        }
    }

    #[test]
    fn test_bounded_by_custom_size() {
        let cache: Cache<u32, Weighted> = Cache::with_max_size(10);
        cache.get(&1, |_| Weighted(4));
        cache.get(&2, |_| Weighted(4));
        assert_eq!(cache.size(), 8);

        cache.get(&3, |_| Weighted(4));
        assert!(cache.size() <= 10);
        assert!(cache.len() <= 2);
    }

    #[test]
    fn test_oversized_value_is_still_returned() {
        let cache: Cache<u32, Weighted> = Cache::with_max_size(2);
        assert_eq!(cache.get(&1, |_| Weighted(5)), Weighted(5));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_default_size() {
        let cache: Cache<u32, Unit> = Cache::default();
        assert_eq!(cache.max_size(), DEFAULT_CACHE_SIZE);
    }

    #[test]
    fn test_concurrent_get() {
        let cache: Arc<Cache<u32, Unit>> = Arc::new(Cache::with_max_size(16));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..200 {
                        let key = (i * 7 + t) % 32;
                        assert_eq!(cache.get(&key, |&k| Unit(k * 2)), Unit(key * 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.size() <= 16);
    }
}
