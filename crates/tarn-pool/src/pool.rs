//! The [`ArrayPool`] contract and the allocate-per-request [`HeapPool`].

use std::alloc::Layout;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::PoolError;

/// A source of backing arrays for pooled collections.
///
/// Collections rent an array when they first need storage or outgrow the
/// current one, and release it when they grow again or are dropped.
///
/// # Contract
///
/// - [`rent`](ArrayPool::rent) never returns an array shorter than
///   `minimum_len`; it may return a longer one. Every slot is initialised,
///   either to `T::default()` or to content left by a previous renter.
/// - [`release`](ArrayPool::release) takes ownership back. When `clear` is
///   true the pool must overwrite every slot with `T::default()` before it
///   hands the array out again, so it does not keep stale values alive.
pub trait ArrayPool<T: Default> {
    /// Rent an array of at least `minimum_len` elements.
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError>;

    /// Return an array previously obtained from [`rent`](ArrayPool::rent).
    fn release(&self, array: Box<[T]>, clear: bool);
}

impl<T: Default, P: ArrayPool<T> + ?Sized> ArrayPool<T> for &P {
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError> {
        (**self).rent(minimum_len)
    }

    fn release(&self, array: Box<[T]>, clear: bool) {
        (**self).release(array, clear)
    }
}

impl<T: Default, P: ArrayPool<T> + ?Sized> ArrayPool<T> for Rc<P> {
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError> {
        (**self).rent(minimum_len)
    }

    fn release(&self, array: Box<[T]>, clear: bool) {
        (**self).release(array, clear)
    }
}

impl<T: Default, P: ArrayPool<T> + ?Sized> ArrayPool<T> for Arc<P> {
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError> {
        (**self).rent(minimum_len)
    }

    fn release(&self, array: Box<[T]>, clear: bool) {
        (**self).release(array, clear)
    }
}

/// Pool that allocates every request exactly and frees on release.
///
/// This is the default pool for collections constructed without one. It
/// never retains arrays, so `clear` on release is irrelevant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapPool;

impl<T: Default> ArrayPool<T> for HeapPool {
    fn rent(&self, minimum_len: usize) -> Result<Box<[T]>, PoolError> {
        alloc_default(minimum_len)
    }

    fn release(&self, array: Box<[T]>, _clear: bool) {
        drop(array);
    }
}

/// Fallibly allocate `len` default-initialised slots.
///
/// Zero-length requests (and zero-sized `T`) do not touch the allocator.
pub fn alloc_default<T: Default>(len: usize) -> Result<Box<[T]>, PoolError> {
    if len == 0 {
        return Ok(Box::default());
    }
    if Layout::array::<T>(len).is_err() {
        return Err(PoolError::CapacityOverflow { requested: len });
    }
    let mut data: Vec<T> = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| PoolError::OutOfMemory { requested: len })?;
    data.resize_with(len, T::default);
    Ok(data.into_boxed_slice())
}

/// Overwrite every slot with `T::default()`.
pub fn clear_array<T: Default>(array: &mut [T]) {
    array.fill_with(T::default);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pool_rents_exact_default_array() {
        let array: Box<[u32]> = HeapPool.rent(8).unwrap();
        assert_eq!(array.len(), 8);
        assert!(array.iter().all(|&v| v == 0));
    }

    #[test]
    fn zero_length_rent_is_valid() {
        let array: Box<[String]> = HeapPool.rent(0).unwrap();
        assert!(array.is_empty());
    }

    #[test]
    fn overflowing_request_is_an_error_not_a_panic() {
        let result: Result<Box<[u64]>, _> = HeapPool.rent(usize::MAX);
        assert_eq!(
            result.unwrap_err(),
            PoolError::CapacityOverflow {
                requested: usize::MAX
            }
        );
    }

    #[test]
    fn zero_sized_elements_never_allocate() {
        let array: Box<[()]> = HeapPool.rent(1_000_000).unwrap();
        assert_eq!(array.len(), 1_000_000);
    }

    #[test]
    fn shared_handles_forward_to_inner_pool() {
        let shared = Arc::new(HeapPool);
        let array: Box<[u8]> = shared.rent(3).unwrap();
        assert_eq!(array.len(), 3);
        shared.release(array, true);

        let local = Rc::new(HeapPool);
        let borrowed = &local;
        let array: Box<[u8]> = borrowed.rent(5).unwrap();
        assert_eq!(array.len(), 5);
    }

    #[test]
    fn pool_is_object_safe() {
        let pool: &dyn ArrayPool<i32> = &HeapPool;
        let array = pool.rent(2).unwrap();
        assert_eq!(&*array, &[0, 0]);
        pool.release(array, false);
    }

    #[test]
    fn clear_array_resets_slots() {
        let mut data = vec![String::from("a"), String::from("b")];
        clear_array(&mut data);
        assert!(data.iter().all(String::is_empty));
    }
}
