//! Pooled circular-buffer queue.
//!
//! [`PooledQueue`] treats its rented `Box<[T]>` as a ring with independent
//! head and tail cursors. Enqueue and dequeue are O(1); growth rents a larger
//! array and re-linearises the ring so the first element lands at index 0.

use std::fmt;
use std::mem;

use tarn_pool::{clear_array, ArrayPool, ClearPolicy, HeapPool};

use crate::error::CollectionError;
use crate::growth::{grown_capacity, should_trim};
use crate::view::{ring_index, QueueRawView, QueueRawViewMut};

/// A FIFO queue stored in a pooled ring buffer.
///
/// # Ring layout
///
/// ```text
///          tail        head
///           ↓           ↓
/// array: [ e2 e3 .. .. e0 e1 ]     size = 4, wrapped
/// ```
///
/// Logical element `i` is at `array[(head + i) % array.len()]`. When the
/// ring is full, `head == tail`; `size` disambiguates full from empty.
pub struct PooledQueue<T: Default, P: ArrayPool<T> = HeapPool> {
    /// Backing ring. Empty (and not rented) until the first growth.
    array: Box<[T]>,
    /// Physical index of the first element.
    head: usize,
    /// Physical index one past the last element.
    tail: usize,
    size: usize,
    /// Structural mutation counter.
    version: u64,
    clear_on_removal: bool,
    pool: P,
}

impl<T: Default> PooledQueue<T, HeapPool> {
    /// Create an empty queue backed by [`HeapPool`]. Does not allocate.
    pub fn new() -> Self {
        Self::new_in(HeapPool)
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        Self::with_capacity_in(capacity, HeapPool)
    }
}

impl<T: Default, P: ArrayPool<T>> PooledQueue<T, P> {
    /// Create an empty queue that rents from `pool`. Does not allocate.
    pub fn new_in(pool: P) -> Self {
        Self::with_policy_in(pool, ClearPolicy::Auto)
    }

    /// Create an empty queue with an explicit clearing policy.
    pub fn with_policy_in(pool: P, policy: ClearPolicy) -> Self {
        Self {
            array: Box::default(),
            head: 0,
            tail: 0,
            size: 0,
            version: 0,
            clear_on_removal: policy.resolve::<T>(),
            pool,
        }
    }

    /// Create an empty queue and rent room for `capacity` elements up front.
    pub fn with_capacity_in(capacity: usize, pool: P) -> Result<Self, CollectionError> {
        let mut queue = Self::new_in(pool);
        if capacity > 0 {
            queue.array = queue.pool.rent(capacity)?;
        }
        Ok(queue)
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the queue has no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the backing ring.
    pub fn capacity(&self) -> usize {
        self.array.len()
    }

    /// Structural mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Physical index of the first element.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Physical index one past the last element.
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Whether vacated slots are reset to `T::default()`.
    pub fn clear_on_removal(&self) -> bool {
        self.clear_on_removal
    }

    /// The pool backing this queue.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Add `value` at the back, growing if the ring is full.
    #[doc(alias = "push_back")]
    pub fn enqueue(&mut self, value: T) -> Result<(), CollectionError> {
        if self.size == self.array.len() {
            let required = self.required(1)?;
            self.reallocate(grown_capacity(self.array.len(), required))?;
        }
        self.array[self.tail] = value;
        self.tail = self.move_next(self.tail);
        self.size += 1;
        self.bump();
        Ok(())
    }

    /// Remove and return the front element.
    ///
    /// Fails with `EmptyCollection` (and changes nothing) if the queue is
    /// empty. The vacated slot is left holding `T::default()`.
    #[doc(alias = "pop_front")]
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.try_dequeue().ok_or(CollectionError::EmptyCollection)
    }

    /// Remove and return the front element, or `None` if empty.
    pub fn try_dequeue(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let value = mem::take(&mut self.array[self.head]);
        self.head = self.move_next(self.head);
        self.size -= 1;
        self.bump();
        Some(value)
    }

    /// The front element, without removing it.
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.try_peek().ok_or(CollectionError::EmptyCollection)
    }

    /// The front element, or `None` if empty.
    pub fn try_peek(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        Some(&self.array[self.head])
    }

    /// Logical element `index` (0 is the front).
    pub fn get(&self, index: usize) -> Option<&T> {
        ring_index(self.head, self.size, self.array.len(), index).map(|slot| &self.array[slot])
    }

    /// Whether any queued element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let (front, back) = self.as_slices();
        front.contains(value) || back.contains(value)
    }

    /// The queued elements as two slices in logical order.
    ///
    /// The second slice is non-empty only when the ring wraps.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.size == 0 {
            return (&[], &[]);
        }
        if self.head < self.tail {
            (&self.array[self.head..self.tail], &[])
        } else {
            (&self.array[self.head..], &self.array[..self.tail])
        }
    }

    /// Clone the queued elements into a `Vec`, front first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let (front, back) = self.as_slices();
        let mut out = Vec::with_capacity(self.size);
        out.extend_from_slice(front);
        out.extend_from_slice(back);
        out
    }

    /// Remove every element. The backing ring is kept.
    pub fn clear(&mut self) {
        if self.size > 0 && self.clear_on_removal {
            if self.head < self.tail {
                clear_array(&mut self.array[self.head..self.tail]);
            } else {
                clear_array(&mut self.array[self.head..]);
                clear_array(&mut self.array[..self.tail]);
            }
        }
        self.head = 0;
        self.tail = 0;
        self.size = 0;
        self.bump();
    }

    /// Make sure the ring can hold at least `capacity` elements, growing by
    /// the usual policy if not. Returns the resulting capacity.
    ///
    /// Bumps the version only if the ring was replaced.
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<usize, CollectionError> {
        if capacity > self.array.len()
            && self.reallocate(grown_capacity(self.array.len(), capacity))?
        {
            self.bump();
        }
        Ok(self.array.len())
    }

    /// Make room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<(), CollectionError> {
        let required = self.required(additional)?;
        self.ensure_capacity(required).map(|_| ())
    }

    /// Shrink the ring to the length if less than 90% is in use.
    pub fn trim_excess(&mut self) -> Result<(), CollectionError> {
        if should_trim(self.size, self.array.len()) && self.reallocate(self.size)? {
            self.bump();
        }
        Ok(())
    }

    /// Borrow the whole ring together with the queue's cursors and counters.
    pub fn raw_view(&self) -> QueueRawView<'_, T> {
        QueueRawView {
            head: self.head,
            tail: self.tail,
            size: self.size,
            version: self.version,
            clear_array: self.clear_on_removal,
            array: &self.array,
        }
    }

    /// Mutably borrow the whole ring together with the cursors and counters.
    pub fn raw_view_mut(&mut self) -> QueueRawViewMut<'_, T> {
        QueueRawViewMut {
            head: self.head,
            tail: self.tail,
            size: self.size,
            version: self.version,
            clear_array: self.clear_on_removal,
            array: &mut self.array,
        }
    }

    /// The whole ring plus `(size, head, tail)`.
    pub fn raw_parts(&self) -> (&[T], usize, usize, usize) {
        (&self.array, self.size, self.head, self.tail)
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn move_next(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.array.len() {
            0
        } else {
            next
        }
    }

    fn required(&self, additional: usize) -> Result<usize, CollectionError> {
        self.size
            .checked_add(additional)
            .ok_or_else(|| CollectionError::InvalidArgument {
                reason: format!(
                    "length {} plus {additional} overflows usize",
                    self.size
                ),
            })
    }

    /// Move the queued elements, in logical order, to the start of a freshly
    /// rented ring.
    ///
    /// The new ring is rented before anything is touched, so a failed rent
    /// leaves the queue exactly as it was. Returns `false`, keeping the
    /// current ring, if the pool hands back one of the same length.
    fn reallocate(&mut self, capacity: usize) -> Result<bool, CollectionError> {
        debug_assert!(capacity >= self.size);
        let mut fresh = if capacity == 0 {
            Box::default()
        } else {
            self.pool.rent(capacity)?
        };
        if fresh.len() == self.array.len() {
            self.release(fresh);
            return Ok(false);
        }
        if self.size > 0 {
            if self.head < self.tail {
                fresh[..self.size].swap_with_slice(&mut self.array[self.head..self.tail]);
            } else {
                let first = self.array.len() - self.head;
                fresh[..first].swap_with_slice(&mut self.array[self.head..]);
                fresh[first..self.size].swap_with_slice(&mut self.array[..self.tail]);
            }
        }
        let old = mem::replace(&mut self.array, fresh);
        self.head = 0;
        self.tail = if self.size == self.array.len() {
            0
        } else {
            self.size
        };
        tracing::trace!(
            from = old.len(),
            to = self.array.len(),
            len = self.size,
            "pooled queue reallocated"
        );
        self.release(old);
        Ok(true)
    }

    fn release(&self, array: Box<[T]>) {
        if !array.is_empty() {
            self.pool.release(array, self.clear_on_removal);
        }
    }
}

impl<T: Default, P: ArrayPool<T>> Drop for PooledQueue<T, P> {
    fn drop(&mut self) {
        let array = mem::take(&mut self.array);
        self.release(array);
    }
}

impl<T: Default, P: ArrayPool<T> + Default> Default for PooledQueue<T, P> {
    fn default() -> Self {
        Self::new_in(P::default())
    }
}

impl<T: Default + Clone, P: ArrayPool<T> + Clone> Clone for PooledQueue<T, P> {
    fn clone(&self) -> Self {
        let mut queue = Self::with_capacity_in(self.size, self.pool.clone())
            .unwrap_or_else(|err| panic!("pooled queue clone failed: {err}"));
        queue.clear_on_removal = self.clear_on_removal;
        let (front, back) = self.as_slices();
        queue.array[..front.len()].clone_from_slice(front);
        queue.array[front.len()..self.size].clone_from_slice(back);
        queue.size = self.size;
        queue.tail = if self.size == queue.array.len() {
            0
        } else {
            self.size
        };
        queue
    }
}

impl<T: Default + fmt::Debug, P: ArrayPool<T>> fmt::Debug for PooledQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (front, back) = self.as_slices();
        f.debug_list().entries(front).entries(back).finish()
    }
}

impl<T, P, Q> PartialEq<PooledQueue<T, Q>> for PooledQueue<T, P>
where
    T: Default + PartialEq,
    P: ArrayPool<T>,
    Q: ArrayPool<T>,
{
    fn eq(&self, other: &PooledQueue<T, Q>) -> bool {
        if self.size != other.size {
            return false;
        }
        let (a0, a1) = self.as_slices();
        let (b0, b1) = other.as_slices();
        a0.iter().chain(a1).eq(b0.iter().chain(b1))
    }
}

impl<T: Default + Eq, P: ArrayPool<T>> Eq for PooledQueue<T, P> {}

impl<T: Default, P: ArrayPool<T>> Extend<T> for PooledQueue<T, P> {
    /// # Panics
    ///
    /// Panics if the pool cannot supply a large enough ring.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        // Growth here is part of the enqueues; only they bump the version.
        let required = self.size.saturating_add(lower);
        if required > self.array.len() {
            self.reallocate(grown_capacity(self.array.len(), required))
                .unwrap_or_else(|err| panic!("pooled queue extend failed: {err}"));
        }
        for value in iter {
            self.enqueue(value)
                .unwrap_or_else(|err| panic!("pooled queue extend failed: {err}"));
        }
    }
}
