//! Bounded product cache with FIFO eviction.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use prodcat_core::ProductRecord;

/// Bounded in-memory store of normalized product records, keyed by handle.
///
/// Eviction is FIFO by *insertion* order, not LRU: reads never touch the
/// order, and re-inserting an existing handle replaces its record without
/// moving it in the queue. This keeps eviction deterministic for a given
/// insert sequence, which matters more here than hit-rate tuning.
pub struct ProductCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

struct CacheInner {
    records: HashMap<String, Arc<ProductRecord>>,
    /// Insertion order, oldest first. Every element has an entry in
    /// `records` and vice versa.
    order: VecDeque<String>,
}

impl ProductCache {
    /// Creates a cache holding at most `capacity` records. A capacity of 0
    /// is clamped to 1 so the most recent record is always retrievable.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                records: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Pure read; does not affect eviction order.
    #[must_use]
    pub fn get(&self, handle: &str) -> Option<Arc<ProductRecord>> {
        let inner = self.inner.lock().expect("cache lock poisoned");
        inner.records.get(handle).cloned()
    }

    /// Inserts or replaces a record.
    ///
    /// An existing handle keeps its insertion position. A new handle at
    /// capacity evicts the oldest-inserted handle first.
    pub fn insert(&self, record: Arc<ProductRecord>) {
        let handle = record.handle.clone();
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        if inner.records.contains_key(&handle) {
            inner.records.insert(handle, record);
            return;
        }

        if inner.order.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.records.remove(&oldest);
                tracing::debug!(evicted = %oldest, "cache at capacity, evicted oldest record");
            }
        }

        inner.order.push_back(handle.clone());
        inner.records.insert(handle, record);
    }

    /// Cached handles in insertion order, oldest first.
    #[must_use]
    pub fn handles(&self) -> Vec<String> {
        let inner = self.inner.lock().expect("cache lock poisoned");
        inner.order.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("cache lock poisoned");
        inner.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
