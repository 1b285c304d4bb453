//! Monotonic time source

/// Monotonic millisecond counter
///
/// Must be non-decreasing. Wrap-around is not handled; a `u64` counter
/// does not wrap in practice.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
