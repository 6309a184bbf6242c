//! Pooled growable list.
//!
//! [`PooledList`] stores its elements contiguously in a `Box<[T]>` rented
//! from an [`ArrayPool`]. Logical length (`len`) and physical capacity are
//! tracked separately; every structural mutation bumps a version counter.
//!
//! Besides the usual element-wise operations the list can reserve an
//! *insert span*: a contiguous gap opened at any index, counted into the
//! length before it is returned, and handed out as `&mut [T]` for a bulk
//! write. Skipping the clearing pass (`clear_span = false`) avoids a
//! redundant reset when the caller overwrites the whole span anyway.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use tarn_pool::{clear_array, ArrayPool, ClearPolicy, HeapPool};

use crate::error::CollectionError;
use crate::growth::{grown_capacity, should_trim};
use crate::view::{ListRawView, ListRawViewMut};

/// A growable array list backed by a pooled array.
///
/// # Storage
///
/// ```text
/// items: [ e0 e1 e2 .. e(len-1) | unspecified .. ]
///          └──── logical ─────┘   └─ spare capacity ─┘
/// ```
///
/// Slots past `len` hold either `T::default()` or a stale value; they are
/// never exposed except through [`raw_parts`](PooledList::raw_parts) and an
/// uncleared insert span.
pub struct PooledList<T: Default, P: ArrayPool<T> = HeapPool> {
    /// Backing array. Empty (and not rented) until the first growth.
    items: Box<[T]>,
    /// Logical length.
    size: usize,
    /// Structural mutation counter.
    version: u64,
    /// Resolved [`ClearPolicy`].
    clear_on_removal: bool,
    pool: P,
}

impl<T: Default> PooledList<T, HeapPool> {
    /// Create an empty list backed by [`HeapPool`]. Does not allocate.
    pub fn new() -> Self {
        Self::new_in(HeapPool)
    }

    /// Create an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        Self::with_capacity_in(capacity, HeapPool)
    }
}

impl<T: Default, P: ArrayPool<T>> PooledList<T, P> {
    /// Create an empty list that rents from `pool`. Does not allocate.
    pub fn new_in(pool: P) -> Self {
        Self::with_policy_in(pool, ClearPolicy::Auto)
    }

    /// Create an empty list with an explicit clearing policy.
    pub fn with_policy_in(pool: P, policy: ClearPolicy) -> Self {
        Self {
            items: Box::default(),
            size: 0,
            version: 0,
            clear_on_removal: policy.resolve::<T>(),
            pool,
        }
    }

    /// Create an empty list and rent room for `capacity` elements up front.
    pub fn with_capacity_in(capacity: usize, pool: P) -> Result<Self, CollectionError> {
        let mut list = Self::new_in(pool);
        if capacity > 0 {
            list.items = list.pool.rent(capacity)?;
        }
        Ok(list)
    }

    /// Create a list holding a clone of `values`.
    pub fn from_slice_in(values: &[T], pool: P) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        let mut list = Self::with_capacity_in(values.len(), pool)?;
        list.items[..values.len()].clone_from_slice(values);
        list.size = values.len();
        Ok(list)
    }

    /// Number of logical elements.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the backing array.
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Structural mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether vacated slots are reset to `T::default()`.
    pub fn clear_on_removal(&self) -> bool {
        self.clear_on_removal
    }

    /// The pool backing this list.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Append `value` at the end, growing if the list is full.
    #[doc(alias = "push")]
    pub fn append(&mut self, value: T) -> Result<(), CollectionError> {
        if self.size == self.items.len() {
            self.grow_for(1)?;
        }
        self.items[self.size] = value;
        self.size += 1;
        self.bump();
        Ok(())
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        self.check_insert_index(index)?;
        if self.size == self.items.len() {
            self.grow_for(1)?;
        }
        // Write into the first spare slot, then rotate it down to `index`.
        self.items[self.size] = value;
        self.items[index..=self.size].rotate_right(1);
        self.size += 1;
        self.bump();
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements left.
    ///
    /// The vacated slot at the old end is left holding `T::default()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        if index >= self.size {
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.size,
            });
        }
        let value = mem::take(&mut self.items[index]);
        self.items[index..self.size].rotate_left(1);
        self.size -= 1;
        self.bump();
        Ok(value)
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        self.size -= 1;
        let value = mem::take(&mut self.items[self.size]);
        self.bump();
        Some(value)
    }

    /// Open a gap of `count` slots at `index` and return it for direct writes.
    ///
    /// Elements at `[index, len)` move to `[index + count, len + count)`.
    /// The length and version are advanced **before** the span is returned,
    /// so the span is already part of the list.
    ///
    /// If `clear_span` is true the span is reset to `T::default()`. If false
    /// it holds unspecified (but initialised) values, and the caller must
    /// write every slot before reading any of them.
    ///
    /// A zero `count` succeeds without changing anything.
    pub fn reserve_insert_span(
        &mut self,
        index: usize,
        count: usize,
        clear_span: bool,
    ) -> Result<&mut [T], CollectionError> {
        self.check_insert_index(index)?;
        if count == 0 {
            return Ok(&mut self.items[index..index]);
        }
        let new_size = self.required(count)?;
        if new_size > self.items.len() {
            self.grow_for(count)?;
        }
        // Spare slots [size, new_size) rotate down into the gap.
        self.items[index..new_size].rotate_right(count);
        self.size = new_size;
        self.bump();

        let span = &mut self.items[index..index + count];
        if clear_span {
            clear_array(span);
        }
        Ok(span)
    }

    /// [`reserve_insert_span`](Self::reserve_insert_span) with a cleared span.
    pub fn insert_span(&mut self, index: usize, count: usize) -> Result<&mut [T], CollectionError> {
        self.reserve_insert_span(index, count, true)
    }

    /// Reserve a span of `count` slots at the end of the list.
    pub fn append_span(
        &mut self,
        count: usize,
        clear_span: bool,
    ) -> Result<&mut [T], CollectionError> {
        self.reserve_insert_span(self.size, count, clear_span)
    }

    /// Append clones of `values` in one bulk step.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        self.insert_from_slice(self.size, values)
    }

    /// Insert clones of `values` at `index` in one bulk step.
    pub fn insert_from_slice(&mut self, index: usize, values: &[T]) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        // Every slot is overwritten, so clearing first would be wasted work.
        let span = self.reserve_insert_span(index, values.len(), false)?;
        span.clone_from_slice(values);
        Ok(())
    }

    /// Remove `count` elements starting at `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), CollectionError> {
        match index.checked_add(count) {
            Some(end) if end <= self.size => {}
            _ => {
                return Err(CollectionError::IndexOutOfRange {
                    index: index.saturating_add(count),
                    len: self.size,
                })
            }
        }
        if count == 0 {
            return Ok(());
        }
        let old_size = self.size;
        self.items[index..old_size].rotate_left(count);
        self.size = old_size - count;
        if self.clear_on_removal {
            clear_array(&mut self.items[self.size..old_size]);
        }
        self.bump();
        Ok(())
    }

    /// Shorten the list to `len` elements. Does nothing if already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.size {
            return;
        }
        if self.clear_on_removal {
            clear_array(&mut self.items[len..self.size]);
        }
        self.size = len;
        self.bump();
    }

    /// Remove every element. The backing array is kept.
    pub fn clear(&mut self) {
        if self.clear_on_removal {
            clear_array(&mut self.items[..self.size]);
        }
        self.size = 0;
        self.bump();
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        if index >= self.size {
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.size,
            });
        }
        let old = mem::replace(&mut self.items[index], value);
        self.bump();
        Ok(old)
    }

    /// Swap the elements at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), CollectionError> {
        for index in [a, b] {
            if index >= self.size {
                return Err(CollectionError::IndexOutOfRange {
                    index,
                    len: self.size,
                });
            }
        }
        self.items.swap(a, b);
        self.bump();
        Ok(())
    }

    /// Element at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`, if in range. Does not bump the version.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// First element.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// Index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|v| v == value)
    }

    /// The logical elements.
    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.size]
    }

    /// The logical elements, mutably. Does not bump the version.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items[..self.size]
    }

    /// Make room for at least `additional` more elements.
    ///
    /// Bumps the version only if the backing array was replaced.
    pub fn reserve(&mut self, additional: usize) -> Result<(), CollectionError> {
        let required = self.required(additional)?;
        if required > self.items.len()
            && self.reallocate(grown_capacity(self.items.len(), required))?
        {
            self.bump();
        }
        Ok(())
    }

    /// Replace the backing array with one of at least `capacity` elements.
    ///
    /// The pool may hand out a longer array than asked for; if it hands out
    /// one as long as the current array, nothing changes. Fails with
    /// `InvalidArgument` if `capacity < len()`.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), CollectionError> {
        if capacity < self.size {
            return Err(CollectionError::InvalidArgument {
                reason: format!("capacity {capacity} is less than length {}", self.size),
            });
        }
        if capacity != self.items.len() && self.reallocate(capacity)? {
            self.bump();
        }
        Ok(())
    }

    /// Shrink the backing array to the length if less than 90% is in use.
    pub fn trim_excess(&mut self) -> Result<(), CollectionError> {
        if should_trim(self.size, self.items.len()) && self.reallocate(self.size)? {
            self.bump();
        }
        Ok(())
    }

    /// Borrow the logical elements together with the list's counters.
    pub fn raw_view(&self) -> ListRawView<'_, T> {
        ListRawView {
            size: self.size,
            version: self.version,
            clear_items: self.clear_on_removal,
            items: &self.items[..self.size],
        }
    }

    /// Mutably borrow the logical elements together with the list's counters.
    pub fn raw_view_mut(&mut self) -> ListRawViewMut<'_, T> {
        ListRawViewMut {
            size: self.size,
            version: self.version,
            clear_items: self.clear_on_removal,
            items: &mut self.items[..self.size],
        }
    }

    /// The entire backing array and the logical length.
    ///
    /// Slots at and past the length hold unspecified values.
    pub fn raw_parts(&self) -> (&[T], usize) {
        (&self.items, self.size)
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn check_insert_index(&self, index: usize) -> Result<(), CollectionError> {
        if index > self.size {
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.size,
            });
        }
        Ok(())
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

    /// Grow so that `additional` more elements fit.
    fn grow_for(&mut self, additional: usize) -> Result<(), CollectionError> {
        let required = self.required(additional)?;
        self.reallocate(grown_capacity(self.items.len(), required))
            .map(|_| ())
    }

    /// Move the logical elements into a freshly rented array.
    ///
    /// The new array is rented before anything is touched, so a failed rent
    /// leaves the list exactly as it was. Returns `false`, keeping the
    /// current array, if the pool hands back one of the same length.
    fn reallocate(&mut self, capacity: usize) -> Result<bool, CollectionError> {
        debug_assert!(capacity >= self.size);
        let mut fresh = if capacity == 0 {
            Box::default()
        } else {
            self.pool.rent(capacity)?
        };
        if fresh.len() == self.items.len() {
            self.release(fresh);
            return Ok(false);
        }
        fresh[..self.size].swap_with_slice(&mut self.items[..self.size]);
        let old = mem::replace(&mut self.items, fresh);
        tracing::trace!(
            from = old.len(),
            to = self.items.len(),
            len = self.size,
            "pooled list reallocated"
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

impl<T: Default, P: ArrayPool<T>> Drop for PooledList<T, P> {
    fn drop(&mut self) {
        let items = mem::take(&mut self.items);
        self.release(items);
    }
}

impl<T: Default, P: ArrayPool<T> + Default> Default for PooledList<T, P> {
    fn default() -> Self {
        Self::new_in(P::default())
    }
}

impl<T: Default + Clone, P: ArrayPool<T> + Clone> Clone for PooledList<T, P> {
    fn clone(&self) -> Self {
        let mut list = Self {
            items: Box::default(),
            size: 0,
            version: 0,
            clear_on_removal: self.clear_on_removal,
            pool: self.pool.clone(),
        };
        list.extend_from_slice(self.as_slice())
            .unwrap_or_else(|err| panic!("pooled list clone failed: {err}"));
        list.version = 0;
        list
    }
}

impl<T: Default + fmt::Debug, P: ArrayPool<T>> fmt::Debug for PooledList<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, P, Q> PartialEq<PooledList<T, Q>> for PooledList<T, P>
where
    T: Default + PartialEq,
    P: ArrayPool<T>,
    Q: ArrayPool<T>,
{
    fn eq(&self, other: &PooledList<T, Q>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Default + Eq, P: ArrayPool<T>> Eq for PooledList<T, P> {}

impl<T: Default, P: ArrayPool<T>> Index<usize> for PooledList<T, P> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Default, P: ArrayPool<T>> IndexMut<usize> for PooledList<T, P> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Default, P: ArrayPool<T>> Extend<T> for PooledList<T, P> {
    /// # Panics
    ///
    /// Panics if the pool cannot supply a large enough array.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        // Growth here is part of the appends; only they bump the version.
        if self.size.saturating_add(lower) > self.items.len() {
            self.grow_for(lower)
                .unwrap_or_else(|err| panic!("pooled list extend failed: {err}"));
        }
        for value in iter {
            self.append(value)
                .unwrap_or_else(|err| panic!("pooled list extend failed: {err}"));
        }
    }
}
