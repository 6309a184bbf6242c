//! Pool configuration parameters.

use crate::error::PoolError;

/// Configuration for a [`BucketPool`](crate::BucketPool).
///
/// Controls the size-class range and how many released arrays each class
/// retains. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Length of the smallest size class, in elements.
    ///
    /// Default: 16. Must be a power of two and at least 1. Requests shorter
    /// than this are rounded up to it.
    pub min_array_len: usize,

    /// Length of the largest size class, in elements.
    ///
    /// Default: 1_048_576. Must be a power of two and `>= min_array_len`.
    /// Larger requests are allocated exactly and never retained.
    pub max_array_len: usize,

    /// Maximum number of released arrays kept per size class.
    ///
    /// Default: 32. Releases beyond this are dropped.
    pub arrays_per_bucket: usize,
}

impl PoolConfig {
    /// Default smallest size class.
    pub const DEFAULT_MIN_ARRAY_LEN: usize = 16;

    /// Default largest size class (1M elements).
    pub const DEFAULT_MAX_ARRAY_LEN: usize = 1 << 20;

    /// Default retention per size class.
    pub const DEFAULT_ARRAYS_PER_BUCKET: usize = 32;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            min_array_len: Self::DEFAULT_MIN_ARRAY_LEN,
            max_array_len: Self::DEFAULT_MAX_ARRAY_LEN,
            arrays_per_bucket: Self::DEFAULT_ARRAYS_PER_BUCKET,
        }
    }

    /// Check the documented constraints.
    pub fn validate(&self) -> Result<(), PoolError> {
        if !self.min_array_len.is_power_of_two() {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "min_array_len must be a power of two (got {})",
                    self.min_array_len
                ),
            });
        }
        if !self.max_array_len.is_power_of_two() || self.max_array_len < self.min_array_len {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "max_array_len must be a power of two and >= min_array_len \
                     (got {}, min {})",
                    self.max_array_len, self.min_array_len
                ),
            });
        }
        if self.arrays_per_bucket == 0 {
            return Err(PoolError::InvalidConfig {
                reason: "arrays_per_bucket must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Number of size classes between `min_array_len` and `max_array_len`.
    pub fn bucket_count(&self) -> usize {
        (self.max_array_len.trailing_zeros() - self.min_array_len.trailing_zeros()) as usize + 1
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PoolConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bucket_count(), 17);
    }

    #[test]
    fn rejects_non_power_of_two_min() {
        let config = PoolConfig {
            min_array_len: 12,
            ..PoolConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_max_below_min() {
        let config = PoolConfig {
            min_array_len: 64,
            max_array_len: 32,
            ..PoolConfig::new()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_retention() {
        let config = PoolConfig {
            arrays_per_bucket: 0,
            ..PoolConfig::new()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn single_class_when_min_equals_max() {
        let config = PoolConfig {
            min_array_len: 8,
            max_array_len: 8,
            arrays_per_bucket: 1,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.bucket_count(), 1);
    }
}
