//! Slot-clearing policy for vacated storage.

/// Whether vacated slots are overwritten with `T::default()`.
///
/// Clearing matters for element types that own something (heap buffers,
/// reference counts, handles): leaving them in unused slots keeps those
/// resources alive until the slot is reused. Plain data gains nothing from
/// clearing and pays a write per slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClearPolicy {
    /// Clear exactly when `T` has drop glue (`std::mem::needs_drop::<T>()`).
    #[default]
    Auto,
    /// Always clear vacated slots.
    Always,
    /// Never clear vacated slots.
    Never,
}

impl ClearPolicy {
    /// Resolve the policy for element type `T`.
    #[inline]
    pub const fn resolve<T>(self) -> bool {
        match self {
            Self::Auto => std::mem::needs_drop::<T>(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}
