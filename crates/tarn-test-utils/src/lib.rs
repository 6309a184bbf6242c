//! Test utilities and instrumented pools for Tarn development.
//!
//! Provides pool implementations that record or sabotage traffic
//! ([`CountingPool`], [`FailingPool`]) and element fixtures for checking
//! clear-policy behaviour (see [`fixtures`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use indexmap::IndexMap;
use tarn_pool::{alloc_default, ArrayPool, PoolError};

pub use fixtures::{DropCounter, DropTally};

/// One `release` call as seen by a [`CountingPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    pub len: usize,
    pub clear: bool,
}

#[derive(Default)]
struct Ledger {
    rents: usize,
    releases: Vec<Release>,
    /// Array length → number of arrays of that length currently rented.
    outstanding: IndexMap<usize, usize>,
}

/// Pool that allocates exactly (like `HeapPool`) and records every call.
///
/// Inspect with [`rents`](CountingPool::rents),
/// [`releases`](CountingPool::releases) and
/// [`outstanding`](CountingPool::outstanding) after exercising a collection.
#[derive(Default)]
pub struct CountingPool {
    ledger: Mutex<Ledger>,
}

impl CountingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `rent` calls.
    pub fn rents(&self) -> usize {
        self.ledger().rents
    }

    /// Every `release` call, oldest first.
    pub fn releases(&self) -> Vec<Release> {
        self.ledger().releases.clone()
    }

    /// Number of rented arrays not yet released.
    pub fn outstanding(&self) -> usize {
        self.ledger().outstanding.values().sum()
    }

    /// Lengths of rented arrays not yet released, in first-rented order.
    pub fn outstanding_lens(&self) -> Vec<usize> {
        self.ledger()
            .outstanding
            .iter()
            .filter(|(_, &n)| n > 0)
            .map(|(&len, _)| len)
            .collect()
    }

    fn ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl<T: Default> ArrayPool<T> for CountingPool {
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError> {
        let array = alloc_default(minimum_len)?;
        let mut ledger = self.ledger();
        ledger.rents += 1;
        *ledger.outstanding.entry(array.len()).or_insert(0) += 1;
        Ok(array)
    }

    fn release(&self, array: Box<[T]>, clear: bool) {
        let mut ledger = self.ledger();
        let len = array.len();
        ledger.releases.push(Release { len, clear });
        let count = ledger.outstanding.entry(len).or_insert(0);
        assert!(*count > 0, "released an array of length {len} that was never rented");
        *count -= 1;
    }
}

/// Pool that succeeds a fixed number of rents, then reports out-of-memory.
///
/// Useful for checking that a failed growth leaves a collection intact.
/// Uses `AtomicUsize` for the call counter so it satisfies `Sync`.
pub struct FailingPool {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingPool {
    /// Create a pool whose first `succeed_count` rents succeed.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `rent()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Reset the call counter, re-arming the successful rents.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::Relaxed);
    }
}

impl<T: Default> ArrayPool<T> for FailingPool {
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(PoolError::OutOfMemory {
                requested: minimum_len,
            });
        }
        alloc_default(minimum_len)
    }

    fn release(&self, array: Box<[T]>, _clear: bool) {
        drop(array);
    }
}
