//! Capacity growth policy shared by the list and the queue.

/// Smallest non-zero capacity either collection grows to.
pub const MIN_GROWN_CAPACITY: usize = 4;

/// Capacity to request when `current` cannot hold `required` elements.
///
/// Doubles the current capacity (at least [`MIN_GROWN_CAPACITY`]) unless
/// `required` is larger. If doubling overflows, falls back to `required`.
pub fn grown_capacity(current: usize, required: usize) -> usize {
    let doubled = current
        .checked_mul(2)
        .unwrap_or(required)
        .max(MIN_GROWN_CAPACITY);
    doubled.max(required)
}

/// Whether `trim_excess` should reallocate: only when less than 90% of
/// the capacity is in use.
pub fn should_trim(len: usize, capacity: usize) -> bool {
    // len < 0.9 * capacity, in integer arithmetic.
    (len as u128) * 10 < (capacity as u128) * 9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grows_to_four() {
        assert_eq!(grown_capacity(0, 1), 4);
    }

    #[test]
    fn doubles_when_sufficient() {
        assert_eq!(grown_capacity(4, 5), 8);
        assert_eq!(grown_capacity(16, 17), 32);
    }

    #[test]
    fn explicit_demand_wins() {
        assert_eq!(grown_capacity(4, 100), 100);
    }

    #[test]
    fn overflow_falls_back_to_required() {
        let big = usize::MAX / 2 + 1;
        assert_eq!(grown_capacity(big, big + 1), big + 1);
    }

    #[test]
    fn trim_threshold() {
        assert!(should_trim(8, 10));
        assert!(!should_trim(9, 10));
        assert!(!should_trim(0, 0));
        assert!(should_trim(0, 4));
    }
}
