//! Raw views over a collection's backing storage.
//!
//! A raw view is a snapshot of a collection's bookkeeping (size, version,
//! clear policy, and for the queue head/tail) plus a direct borrow of its
//! storage. Views are created by
//! [`PooledList::raw_view`](crate::PooledList::raw_view),
//! [`PooledQueue::raw_view`](crate::PooledQueue::raw_view) and their
//! `_mut` counterparts, in O(1) and without touching the collection.
//!
//! # Lifetime
//!
//! `'a` is the borrow of the source collection. Because the view holds that
//! borrow, no mutating call can run on the collection while the view is
//! alive; the captured `version` is for callers that keep only the counters
//! and want to detect staleness later with `is_current`.

/// Read-only view of a [`PooledList`](crate::PooledList).
///
/// `items` covers exactly the logical elements `[0, size)`.
#[derive(Debug)]
pub struct ListRawView<'a, T> {
    /// Number of logical elements.
    pub size: usize,
    /// List version when the view was taken.
    pub version: u64,
    /// Whether the list clears vacated slots.
    pub clear_items: bool,
    /// The logical elements.
    pub items: &'a [T],
}

impl<T> ListRawView<'_, T> {
    /// Whether the list is still at the version captured by this view.
    pub fn is_current(&self, live_version: u64) -> bool {
        self.version == live_version
    }
}

impl<T> Clone for ListRawView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListRawView<'_, T> {}

/// Writable view of a [`PooledList`](crate::PooledList).
///
/// Writes through `items` replace elements in place. The list's size and
/// version are not affected.
#[derive(Debug)]
pub struct ListRawViewMut<'a, T> {
    /// Number of logical elements.
    pub size: usize,
    /// List version when the view was taken.
    pub version: u64,
    /// Whether the list clears vacated slots.
    pub clear_items: bool,
    /// The logical elements.
    pub items: &'a mut [T],
}

impl<T> ListRawViewMut<'_, T> {
    /// Whether the list is still at the version captured by this view.
    pub fn is_current(&self, live_version: u64) -> bool {
        self.version == live_version
    }
}

/// Read-only view of a [`PooledQueue`](crate::PooledQueue).
///
/// `array` is the **entire** ring. Logical element `i` lives at physical
/// slot `(head + i) % array.len()` for `i < size`; use
/// [`logical_index`](QueueRawView::logical_index) rather than redoing the
/// arithmetic.
#[derive(Debug)]
pub struct QueueRawView<'a, T> {
    /// Physical index of the first logical element.
    pub head: usize,
    /// Physical index one past the last logical element.
    pub tail: usize,
    /// Number of logical elements.
    pub size: usize,
    /// Queue version when the view was taken.
    pub version: u64,
    /// Whether the queue clears vacated slots.
    pub clear_array: bool,
    /// The whole backing ring.
    pub array: &'a [T],
}

impl<'a, T> QueueRawView<'a, T> {
    /// Physical slot of logical element `i`, or `None` if `i >= size`.
    pub fn logical_index(&self, i: usize) -> Option<usize> {
        ring_index(self.head, self.size, self.array.len(), i)
    }

    /// Logical element `i`.
    pub fn get(&self, i: usize) -> Option<&'a T> {
        self.logical_index(i).map(|slot| &self.array[slot])
    }

    /// Whether the queue is still at the version captured by this view.
    pub fn is_current(&self, live_version: u64) -> bool {
        self.version == live_version
    }
}

impl<T> Clone for QueueRawView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for QueueRawView<'_, T> {}

/// Writable view of a [`PooledQueue`](crate::PooledQueue).
#[derive(Debug)]
pub struct QueueRawViewMut<'a, T> {
    /// Physical index of the first logical element.
    pub head: usize,
    /// Physical index one past the last logical element.
    pub tail: usize,
    /// Number of logical elements.
    pub size: usize,
    /// Queue version when the view was taken.
    pub version: u64,
    /// Whether the queue clears vacated slots.
    pub clear_array: bool,
    /// The whole backing ring.
    pub array: &'a mut [T],
}

impl<T> QueueRawViewMut<'_, T> {
    /// Physical slot of logical element `i`, or `None` if `i >= size`.
    pub fn logical_index(&self, i: usize) -> Option<usize> {
        ring_index(self.head, self.size, self.array.len(), i)
    }

    /// Logical element `i`, mutably.
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        let slot = self.logical_index(i)?;
        Some(&mut self.array[slot])
    }

    /// Whether the queue is still at the version captured by this view.
    pub fn is_current(&self, live_version: u64) -> bool {
        self.version == live_version
    }
}

/// Map logical position `i` to a physical ring slot.
///
/// Written without `head + i` so it cannot overflow for huge rings.
pub(crate) fn ring_index(head: usize, size: usize, len: usize, i: usize) -> Option<usize> {
    if i >= size {
        return None;
    }
    let until_wrap = len - head;
    Some(if i >= until_wrap { i - until_wrap } else { head + i })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_index_wraps() {
        // len 4, head 2, size 3 → slots 2, 3, 0.
        assert_eq!(ring_index(2, 3, 4, 0), Some(2));
        assert_eq!(ring_index(2, 3, 4, 1), Some(3));
        assert_eq!(ring_index(2, 3, 4, 2), Some(0));
        assert_eq!(ring_index(2, 3, 4, 3), None);
    }

    #[test]
    fn queue_view_reads_in_logical_order() {
        let array = [30, 40, 10, 20];
        let view = QueueRawView {
            head: 2,
            tail: 2,
            size: 4,
            version: 7,
            clear_array: false,
            array: &array,
        };
        let logical: Vec<_> = (0..view.size).map(|i| *view.get(i).unwrap()).collect();
        assert_eq!(logical, vec![10, 20, 30, 40]);
        assert!(view.is_current(7));
        assert!(!view.is_current(8));
    }

    #[test]
    fn queue_view_mut_writes_through() {
        let mut array = [0u8; 4];
        let mut view = QueueRawViewMut {
            head: 3,
            tail: 1,
            size: 2,
            version: 0,
            clear_array: false,
            array: &mut array,
        };
        *view.get_mut(0).unwrap() = 1;
        *view.get_mut(1).unwrap() = 2;
        assert!(view.get_mut(2).is_none());
        assert_eq!(array, [2, 0, 0, 1]);
    }
}
