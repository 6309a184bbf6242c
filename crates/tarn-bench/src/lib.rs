//! Benchmark workloads for Tarn pooled collections.
//!
//! Provides reusable workloads shared by the criterion benches:
//!
//! - [`fill_list`]: append `n` values one at a time
//! - [`fill_list_spans`]: append `n` values in fixed-size insert spans
//! - [`churn_queue`]: enqueue/dequeue bursts that keep the ring wrapping
//! - [`insert_positions`]: deterministic pseudo-random insert indices

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tarn_collections::{CollectionError, PooledList, PooledQueue};
use tarn_pool::ArrayPool;

/// Append `0..n` to a fresh list, one element per call.
pub fn fill_list<P: ArrayPool<u64>>(
    pool: P,
    n: usize,
) -> Result<PooledList<u64, P>, CollectionError> {
    let mut list = PooledList::new_in(pool);
    for v in 0..n as u64 {
        list.append(v)?;
    }
    Ok(list)
}

/// Append `0..n` to a fresh list through uncleared spans of `chunk` slots.
///
/// The final span may be shorter than `chunk`.
pub fn fill_list_spans<P: ArrayPool<u64>>(
    pool: P,
    n: usize,
    chunk: usize,
) -> Result<PooledList<u64, P>, CollectionError> {
    let chunk = chunk.max(1);
    let mut list = PooledList::new_in(pool);
    let mut next = 0u64;
    while list.len() < n {
        let count = chunk.min(n - list.len());
        // Every slot is written below, so the span is not cleared.
        for slot in list.append_span(count, false)? {
            *slot = next;
            next += 1;
        }
    }
    Ok(list)
}

/// Run `rounds` bursts of `burst` enqueues followed by `burst` dequeues.
///
/// Returns the sum of dequeued values so the work cannot be optimised out.
pub fn churn_queue<P: ArrayPool<u64>>(
    queue: &mut PooledQueue<u64, P>,
    rounds: usize,
    burst: usize,
) -> Result<u64, CollectionError> {
    let mut sum = 0u64;
    let mut next = 0u64;
    for _ in 0..rounds {
        for _ in 0..burst {
            queue.enqueue(next)?;
            next += 1;
        }
        for _ in 0..burst {
            sum = sum.wrapping_add(queue.dequeue()?);
        }
    }
    Ok(sum)
}

/// Generate `n` insert indices, each valid for a list that grows by one
/// per insert starting from `initial_len`.
pub fn insert_positions(initial_len: usize, n: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % (initial_len + i + 1) as u64) as usize
        })
        .collect()
}
