//! Constant-time comparison of hash strings.

use subtle::ConstantTimeEq;

/// Compares `a` and `b` without exiting early on the first differing byte.
///
/// Inputs of different length compare unequal. Only the length is leaked in
/// that case, and the legacy path only compares fixed-length hashes.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Equality primitive used to compare a computed hash with the stored one.
pub trait Comparator: Send + Sync {
    /// Returns `true` when both hashes are identical.
    ///
    /// Must not panic on length mismatch and must not depend on the position
    /// of the first differing byte.
    fn matches(&self, computed: &str, stored: &str) -> bool;
}

impl<T: Comparator + ?Sized> Comparator for &T {
    fn matches(&self, computed: &str, stored: &str) -> bool {
        (**self).matches(computed, stored)
    }
}

/// [`Comparator`] backed by [`constant_time_eq`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantTime;

impl Comparator for ConstantTime {
    fn matches(&self, computed: &str, stored: &str) -> bool {
        constant_time_eq(computed.as_bytes(), stored.as_bytes())
    }
}
