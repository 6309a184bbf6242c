//! Element fixtures for clear-policy and leak checks.
//!
//! [`DropCounter`] is an element type with drop glue that reports to a
//! shared [`DropTally`] when a *live* value is dropped. Its `Default` value
//! is inert, so slots reset by a collection do not count.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of dropped [`DropCounter`] values.
#[derive(Clone, Debug, Default)]
pub struct DropTally {
    drops: Arc<AtomicUsize>,
}

impl DropTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a live element reporting to this tally.
    pub fn element(&self, id: u32) -> DropCounter {
        DropCounter {
            id,
            tally: Some(self.drops.clone()),
        }
    }

    /// Number of live elements dropped so far.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::Relaxed)
    }

    /// Number of live elements not yet dropped.
    ///
    /// Counts every other holder of the shared counter, so keep a single
    /// `DropTally` per test.
    pub fn live(&self) -> usize {
        Arc::strong_count(&self.drops) - 1
    }
}

/// An element that counts its own drop.
///
/// `DropCounter::default()` carries no tally and is what cleared slots
/// hold.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    pub id: u32,
    tally: Option<Arc<AtomicUsize>>,
}

impl DropCounter {
    /// Whether this is a live element (not a default placeholder).
    pub fn is_live(&self) -> bool {
        self.tally.is_some()
    }
}

impl PartialEq for DropCounter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.is_live() == other.is_live()
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        if let Some(tally) = &self.tally {
            tally.fetch_add(1, Ordering::Relaxed);
        }
    }
}
