//! Pooled growable list and circular queue with zero-copy raw views.
//!
//! Both collections keep their elements in one contiguous array rented from
//! a [`tarn_pool::ArrayPool`], track logical length separately from
//! capacity, and count structural mutations in a version counter.
//!
//! # Architecture
//!
//! ```text
//! ArrayPool<T> (HeapPool, BucketPool, &P, Rc<P>, Arc<P>)
//! ├── PooledList<T, P>   contiguous [0, len), insert spans
//! │   └── ListRawView / ListRawViewMut
//! └── PooledQueue<T, P>  ring buffer, head/tail cursors
//!     └── QueueRawView / QueueRawViewMut
//! ```
//!
//! # Growth
//!
//! Both collections grow to `max(4, 2 * capacity)`, or to the explicit
//! demand if larger. The new array is rented before any state changes, so
//! a failed rent returns [`CollectionError::OutOfMemory`] and leaves the
//! collection untouched. Old arrays go back to the pool.
//!
//! # Raw views
//!
//! `raw_view()` borrows the backing storage together with the size,
//! version and clear flag (plus head and tail for the queue). The borrow
//! rules out mutation while the view exists; the captured version lets
//! callers that keep only the counters detect staleness afterwards.
//!
//! # Threading
//!
//! Collections are single-writer and never lock. Share the pool, not the
//! collection.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;
pub mod list;
pub mod queue;
pub mod view;

// Public re-exports for the primary API surface.
pub use error::CollectionError;
pub use list::PooledList;
pub use queue::PooledQueue;
pub use view::{ListRawView, ListRawViewMut, QueueRawView, QueueRawViewMut};
