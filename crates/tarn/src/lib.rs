//! Tarn: pooled array-backed collections with zero-copy raw views.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Tarn sub-crates. For most users, adding `tarn` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use tarn::prelude::*;
//!
//! // One pool shared by every collection of the same element type.
//! let pool = Arc::new(BucketPool::<f32>::new(PoolConfig::default()).unwrap());
//!
//! let mut samples = PooledList::new_in(pool.clone());
//! samples.extend_from_slice(&[0.5, 1.5]).unwrap();
//!
//! // Open a gap at index 1 and fill it in bulk.
//! let span = samples.insert_span(1, 3).unwrap();
//! span.copy_from_slice(&[1.0, 1.0, 1.0]);
//! assert_eq!(samples.as_slice(), &[0.5, 1.0, 1.0, 1.0, 1.5]);
//!
//! // A raw view carries the counters alongside the live elements.
//! let view = samples.raw_view();
//! assert_eq!(view.size, 5);
//! assert!(view.is_current(samples.version()));
//!
//! let mut pending = PooledQueue::new_in(pool.clone());
//! pending.enqueue(2.0).unwrap();
//! assert_eq!(pending.dequeue(), Ok(2.0));
//! assert_eq!(pending.dequeue(), Err(CollectionError::EmptyCollection));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`pool`] | `tarn-pool` | `ArrayPool` trait, heap and bucketed pools, clear policy |
//! | [`collections`] | `tarn-collections` | `PooledList`, `PooledQueue`, raw views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Array pools and their configuration (`tarn-pool`).
///
/// [`pool::HeapPool`] allocates exactly and frees on release;
/// [`pool::BucketPool`] keeps released arrays in power-of-two size classes.
pub use tarn_pool as pool;

/// Pooled list and queue (`tarn-collections`).
///
/// Includes the raw view types and the growth helpers in
/// [`collections::growth`].
pub use tarn_collections as collections;

/// Common imports for typical Tarn usage.
///
/// ```rust
/// use tarn::prelude::*;
/// ```
pub mod prelude {
    // Pools
    pub use tarn_pool::{ArrayPool, BucketPool, ClearPolicy, HeapPool, PoolConfig, PoolError};

    // Collections
    pub use tarn_collections::{CollectionError, PooledList, PooledQueue};

    // Raw views
    pub use tarn_collections::{ListRawView, ListRawViewMut, QueueRawView, QueueRawViewMut};
}
