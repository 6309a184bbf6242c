//! Size-class array pool.
//!
//! A [`BucketPool`] keeps released arrays in power-of-two size classes
//! ("buckets") between [`PoolConfig::min_array_len`] and
//! [`PoolConfig::max_array_len`]. A rent rounds the request up to its class
//! and reuses a retained array when one is available. Requests above the
//! largest class are allocated exactly and dropped on release.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::pool::{alloc_default, clear_array, ArrayPool};

/// Counters describing pool activity since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total calls to `rent`.
    pub rents: u64,
    /// Rents served from a retained array.
    pub hits: u64,
    /// Rents that had to allocate.
    pub allocations: u64,
    /// Total calls to `release`.
    pub releases: u64,
    /// Released arrays that were dropped instead of retained.
    pub discarded: u64,
    /// Arrays currently retained across all buckets.
    pub retained: usize,
}

/// A thread-safe pool of arrays grouped into power-of-two size classes.
///
/// Each bucket is guarded by its own `Mutex`, so contention is limited to
/// callers renting the same size class. Collections that share a pool
/// typically hold it through an `Arc` or a plain reference.
pub struct BucketPool<T> {
    /// One retained-array stack per size class, smallest first.
    buckets: Vec<Mutex<Vec<Box<[T]>>>>,
    config: PoolConfig,
    rents: AtomicU64,
    hits: AtomicU64,
    allocations: AtomicU64,
    releases: AtomicU64,
    discarded: AtomicU64,
}

impl<T> BucketPool<T> {
    /// Create a pool with the given configuration.
    ///
    /// Returns `Err(PoolError::InvalidConfig)` if `config` fails
    /// [`PoolConfig::validate`].
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let buckets = (0..config.bucket_count())
            .map(|_| Mutex::new(Vec::new()))
            .collect();
        Ok(Self {
            buckets,
            config,
            rents: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            allocations: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        })
    }

    /// The configuration this pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Index of the size class serving a request of `len` elements, or
    /// `None` if `len` exceeds the largest class.
    pub fn bucket_index(&self, len: usize) -> Option<usize> {
        if len > self.config.max_array_len {
            return None;
        }
        let class_len = len.max(self.config.min_array_len).next_power_of_two();
        Some((class_len.trailing_zeros() - self.config.min_array_len.trailing_zeros()) as usize)
    }

    /// Array length of size class `index`.
    pub fn bucket_len(&self, index: usize) -> usize {
        self.config.min_array_len << index
    }

    /// Number of arrays currently retained.
    pub fn retained(&self) -> usize {
        self.buckets.iter().map(|b| self.lock(b).len()).sum()
    }

    /// Drop every retained array.
    pub fn trim(&self) {
        for bucket in &self.buckets {
            self.lock(bucket).clear();
        }
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            rents: self.rents.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            retained: self.retained(),
        }
    }

    fn lock<'a>(&self, bucket: &'a Mutex<Vec<Box<[T]>>>) -> MutexGuard<'a, Vec<Box<[T]>>> {
        // Buckets only hold whole arrays; a panic mid-push cannot leave one torn.
        bucket.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("bucket pool lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn discard(&self, len: usize, why: &'static str) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(len, why, "bucket pool discarded released array");
    }
}

impl<T: Default> ArrayPool<T> for BucketPool<T> {
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError> {
        self.rents.fetch_add(1, Ordering::Relaxed);
        if minimum_len == 0 {
            return Ok(Box::default());
        }

        let Some(index) = self.bucket_index(minimum_len) else {
            tracing::debug!(
                len = minimum_len,
                max = self.config.max_array_len,
                "bucket pool request above largest class, allocating exactly"
            );
            let array = alloc_default(minimum_len)?;
            self.allocations.fetch_add(1, Ordering::Relaxed);
            return Ok(array);
        };

        if let Some(array) = self.lock(&self.buckets[index]).pop() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(array);
        }

        let class_len = self.bucket_len(index);
        tracing::debug!(class_len, "bucket pool class empty, allocating");
        let array = alloc_default(class_len)?;
        self.allocations.fetch_add(1, Ordering::Relaxed);
        Ok(array)
    }

    fn release(&self, mut array: Box<[T]>, clear: bool) {
        self.releases.fetch_add(1, Ordering::Relaxed);
        let len = array.len();
        if len == 0 {
            return;
        }
        if len > self.config.max_array_len {
            self.discard(len, "oversized");
            return;
        }
        if !len.is_power_of_two() || len < self.config.min_array_len {
            self.discard(len, "not a class length");
            return;
        }

        // Only class lengths reach this point, so the index is exact.
        let Some(index) = self.bucket_index(len) else {
            self.discard(len, "oversized");
            return;
        };
        if clear {
            clear_array(&mut array);
        }
        let mut bucket = self.lock(&self.buckets[index]);
        if bucket.len() < self.config.arrays_per_bucket {
            bucket.push(array);
        } else {
            drop(bucket);
            self.discard(len, "bucket full");
        }
    }
}

impl<T> Default for BucketPool<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default()).expect("default pool config is valid")
    }
}

impl<T> std::fmt::Debug for BucketPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketPool")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
