//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;

use tambour_hal::Clock;

/// [`Clock`] on top of `embassy_time::Instant`
///
/// The millisecond counter is truncated to 32 bits and wraps after about
/// 49 days; debounce comparisons use wrapping arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
