//! Backing-array pools for Tarn pooled collections.
//!
//! Every Tarn collection stores its elements in a single contiguous
//! `Box<[T]>` rented from an [`ArrayPool`]. When the collection outgrows the
//! array it rents a larger one, moves its elements across, and releases the
//! old array back to the pool; when it is dropped, the array goes back too.
//!
//! # Pools
//!
//! - [`HeapPool`]: allocate exactly on rent, free on release. Zero-sized,
//!   the default for collections built without an explicit pool.
//! - [`BucketPool`]: power-of-two size classes with bounded retention.
//!   `Sync`, so one pool can back collections on many threads.
//!
//! Any `&P`, `Rc<P>` or `Arc<P>` where `P: ArrayPool<T>` is itself a pool,
//! which is how several collections share one.
//!
//! # Clearing
//!
//! [`ClearPolicy`] decides whether vacated slots are reset to
//! `T::default()`. Collections resolve it once at construction and pass
//! the result as the `clear` flag of [`ArrayPool::release`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bucket;
pub mod config;
pub mod error;
pub mod policy;
pub mod pool;

// Public re-exports for the primary API surface.
pub use bucket::{BucketPool, PoolStats};
pub use config::PoolConfig;
pub use error::PoolError;
pub use policy::ClearPolicy;
pub use pool::{alloc_default, clear_array, ArrayPool, HeapPool};
