//! Integration tests: collections against instrumented and shared pools.
//!
//! Covers array hand-back on growth and drop, the clear flag passed to the
//! pool, strong failure atomicity when the pool runs dry, and reuse of
//! arrays across collections sharing a `BucketPool`.

use std::sync::Arc;

use tarn_collections::{CollectionError, PooledList, PooledQueue};
use tarn_pool::{ArrayPool, BucketPool, ClearPolicy, HeapPool, PoolConfig};
use tarn_test_utils::{CountingPool, DropCounter, DropTally, FailingPool, Release};

// ── Pool traffic ─────────────────────────────────────────────────────

#[test]
fn list_returns_arrays_on_growth_and_drop() {
    let pool = CountingPool::new();
    {
        let mut list = PooledList::new_in(&pool);
        for v in 1..=5u32 {
            list.append(v).unwrap();
        }
        assert_eq!(pool.rents(), 2);
        assert_eq!(pool.releases(), vec![Release { len: 4, clear: false }]);
        assert_eq!(pool.outstanding_lens(), vec![8]);
    }
    assert_eq!(pool.outstanding(), 0);
    assert_eq!(
        pool.releases().last(),
        Some(&Release { len: 8, clear: false })
    );
}

#[test]
fn owning_elements_are_released_with_clear() {
    let pool = CountingPool::new();
    let mut queue = PooledQueue::new_in(&pool);
    for s in ["a", "b", "c", "d", "e"] {
        queue.enqueue(s.to_owned()).unwrap();
    }
    drop(queue);
    assert!(pool.releases().iter().all(|r| r.clear));
    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn empty_collections_never_touch_the_pool() {
    let pool = CountingPool::new();
    let list: PooledList<u8, _> = PooledList::new_in(&pool);
    let queue: PooledQueue<u8, _> = PooledQueue::new_in(&pool);
    drop(list);
    drop(queue);
    assert_eq!(pool.rents(), 0);
    assert!(pool.releases().is_empty());
}

// ── Failure atomicity ────────────────────────────────────────────────

#[test]
fn failed_list_growth_leaves_state_intact() {
    let pool = FailingPool::new(1);
    let mut list = PooledList::new_in(&pool);
    for v in 0..4 {
        list.append(v).unwrap();
    }
    let version = list.version();

    assert_eq!(
        list.append(4),
        Err(CollectionError::OutOfMemory { requested: 8 })
    );
    assert_eq!(list.as_slice(), &[0, 1, 2, 3]);
    assert_eq!(list.capacity(), 4);
    assert_eq!(list.version(), version);

    assert!(list.insert(0, 9).is_err());
    assert!(list.reserve_insert_span(2, 3, false).is_err());
    assert_eq!(list.as_slice(), &[0, 1, 2, 3]);
    assert_eq!(list.version(), version);

    // Operations that fit in the current array still work.
    assert_eq!(list.remove_at(0).unwrap(), 0);
    list.insert(0, 7).unwrap();
    assert_eq!(list.as_slice(), &[7, 1, 2, 3]);
}

#[test]
fn failed_queue_growth_leaves_wrapped_ring_intact() {
    let pool = FailingPool::new(1);
    let mut queue = PooledQueue::with_capacity_in(4, &pool).unwrap();
    for v in 0..4 {
        queue.enqueue(v).unwrap();
    }
    queue.dequeue().unwrap();
    queue.enqueue(4).unwrap();
    let (head, tail, version) = (queue.head(), queue.tail(), queue.version());

    assert_eq!(
        queue.enqueue(5),
        Err(CollectionError::OutOfMemory { requested: 8 })
    );
    assert_eq!((queue.head(), queue.tail()), (head, tail));
    assert_eq!(queue.version(), version);
    assert_eq!(queue.to_vec(), vec![1, 2, 3, 4]);
}

// ── Clear policy ─────────────────────────────────────────────────────

#[test]
fn auto_policy_drops_cleared_elements_immediately() {
    let tally = DropTally::new();
    let mut list = PooledList::new();
    for id in 0..3 {
        list.append(tally.element(id)).unwrap();
    }
    assert!(list.clear_on_removal());
    list.clear();
    assert_eq!(tally.drops(), 3);
    assert!(list.raw_parts().0.iter().all(|e| !e.is_live()));
}

#[test]
fn never_policy_keeps_elements_until_reuse_or_drop() {
    let tally = DropTally::new();
    let mut list = PooledList::with_policy_in(HeapPool, ClearPolicy::Never);
    for id in 0..3 {
        list.append(tally.element(id)).unwrap();
    }
    list.truncate(1);
    assert_eq!(tally.drops(), 0);
    assert_eq!(tally.live(), 3);

    // Overwriting a stale slot drops its old occupant.
    list.append(DropCounter::default()).unwrap();
    assert_eq!(tally.drops(), 1);

    drop(list);
    assert_eq!(tally.live(), 0);
}

#[test]
fn removed_elements_are_handed_out_not_leaked() {
    let tally = DropTally::new();
    let mut queue = PooledQueue::new();
    for id in 0..5 {
        queue.enqueue(tally.element(id)).unwrap();
    }
    let first = queue.dequeue().unwrap();
    assert_eq!(first.id, 0);
    assert!(first.is_live());
    drop(first);
    assert_eq!(tally.drops(), 1);
    drop(queue);
    assert_eq!(tally.drops(), 5);
}

// ── Shared bucket pool ───────────────────────────────────────────────

fn small_bucket_pool<T>() -> Arc<BucketPool<T>> {
    Arc::new(
        BucketPool::new(PoolConfig {
            min_array_len: 4,
            max_array_len: 1024,
            arrays_per_bucket: 4,
        })
        .unwrap(),
    )
}

#[test]
fn growth_hands_arrays_to_sibling_collections() {
    let pool = small_bucket_pool::<u64>();
    let mut list = PooledList::new_in(pool.clone());
    for v in 0..5 {
        list.append(v).unwrap();
    }
    // The 4-element array went back to the pool when the list grew to 8.
    assert_eq!(pool.retained(), 1);

    let mut queue = PooledQueue::new_in(pool.clone());
    queue.enqueue(1).unwrap();
    assert_eq!(pool.retained(), 0);
    assert_eq!(queue.capacity(), 4);
    assert_eq!(pool.stats().hits, 1);
}

#[test]
fn capacity_is_rounded_to_size_class() {
    let pool = small_bucket_pool::<u8>();
    let list = PooledList::<u8, _>::with_capacity_in(5, pool.clone()).unwrap();
    assert_eq!(list.capacity(), 8);
    drop(list);
    assert_eq!(pool.retained(), 1);
}

#[test]
fn shrinking_within_a_size_class_keeps_the_array() {
    let pool = Arc::new(BucketPool::<u32>::default());
    let mut list = PooledList::new_in(pool.clone());
    list.append(7).unwrap();
    let mut queue = PooledQueue::new_in(pool.clone());
    queue.enqueue(9).unwrap();
    assert_eq!((list.capacity(), queue.capacity()), (16, 16));
    let (list_version, queue_version) = (list.version(), queue.version());
    let rents = pool.stats().rents;

    for _ in 0..3 {
        list.trim_excess().unwrap();
        queue.trim_excess().unwrap();
    }
    list.set_capacity(5).unwrap();

    assert_eq!((list.capacity(), queue.capacity()), (16, 16));
    assert_eq!(list.version(), list_version);
    assert_eq!(queue.version(), queue_version);
    assert_eq!(list.as_slice(), &[7]);
    assert_eq!(queue.to_vec(), vec![9]);
    // Each attempt rented one array and handed it straight back.
    assert_eq!(pool.stats().rents, rents + 7);
    assert_eq!(pool.retained(), 1);
}

#[test]
fn uncleared_pool_arrays_surface_through_uncleared_spans() {
    let pool = small_bucket_pool::<u32>();
    {
        let mut list = PooledList::new_in(pool.clone());
        list.extend_from_slice(&[11, 22, 33, 44]).unwrap();
    }
    let mut list = PooledList::new_in(pool.clone());
    // Plain integers are released without clearing, so the reused array
    // still holds the previous owner's data.
    let span = list.append_span(4, false).unwrap();
    assert_eq!(span, &[11, 22, 33, 44]);

    let span = list.append_span(2, true).unwrap();
    assert_eq!(span, &[0, 0]);
}

#[test]
fn cleared_pool_arrays_come_back_empty() {
    let pool = small_bucket_pool::<String>();
    {
        let mut list = PooledList::new_in(pool.clone());
        list.extend_from_slice(&["x".to_owned(), "y".to_owned()])
            .unwrap();
    }
    let mut list = PooledList::new_in(pool.clone());
    let span = list.append_span(4, false).unwrap();
    assert!(span.iter().all(String::is_empty));
}

#[test]
fn trait_object_pool_backs_a_collection() {
    let bucket = BucketPool::<i32>::default();
    let pool: &dyn ArrayPool<i32> = &bucket;
    let mut list = PooledList::new_in(pool);
    list.extend_from_slice(&[1, 2, 3]).unwrap();
    assert_eq!(list.capacity(), 16);
    assert_eq!(list.as_slice(), &[1, 2, 3]);
}
