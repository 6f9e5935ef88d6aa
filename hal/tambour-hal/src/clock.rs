//! Monotonic time source

/// Monotonic clock
///
/// Both counters start at an arbitrary point (usually boot) and never go
/// backwards. The millisecond counter is allowed to wrap; callers compare
/// timestamps with wrapping arithmetic.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;

    /// Microseconds since an arbitrary epoch
    fn now_us(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }

    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
