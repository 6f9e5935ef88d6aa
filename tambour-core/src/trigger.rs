//! Needle sensor trigger
//!
//! The needle sensor produces a falling edge once per needle cycle. Edges
//! that arrive within [`DEBOUNCE_MS`] of the last accepted edge are contact
//! bounce and are dropped.
//!
//! This code runs in interrupt context: no blocking, no allocation, no
//! logging.

use portable_atomic::{AtomicU32, Ordering};

/// Minimum spacing between accepted needle edges
pub const DEBOUNCE_MS: u32 = 50;

/// What a needle edge did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerOutcome {
    /// Edge arrived inside the debounce window and was dropped
    Debounced,
    /// Edge accepted, but the controller is not started or not enabled
    Disabled,
    /// Edge accepted and the worker was signalled
    Signaled,
}

/// Debounce state for a single needle sensor
///
/// `last_ms` has exactly one writer, the edge handler, so plain atomic
/// load/store is sufficient. A second sensor sharing this state would need
/// a compare-exchange instead.
#[derive(Debug)]
pub struct NeedleTrigger {
    last_ms: AtomicU32,
}

impl NeedleTrigger {
    /// Create with the last accepted edge at time zero
    pub const fn new() -> Self {
        Self {
            last_ms: AtomicU32::new(0),
        }
    }

    /// Apply the debounce window to an edge seen at `now_ms`
    ///
    /// Returns `true` and records `now_ms` if the edge is accepted.
    pub fn accept(&self, now_ms: u32) -> bool {
        let last = self.last_ms.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last) < DEBOUNCE_MS {
            return false;
        }
        self.last_ms.store(now_ms, Ordering::Relaxed);
        true
    }

    /// Timestamp of the last accepted edge
    pub fn last_trigger_ms(&self) -> u32 {
        self.last_ms.load(Ordering::Relaxed)
    }
}

impl Default for NeedleTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_window() {
        let trigger = NeedleTrigger::new();

        assert!(trigger.accept(1_000));
        assert!(!trigger.accept(1_049));
        assert!(trigger.accept(1_050));
        assert_eq!(trigger.last_trigger_ms(), 1_050);
    }

    #[test]
    fn test_rejected_edge_does_not_extend_window() {
        let trigger = NeedleTrigger::new();

        assert!(trigger.accept(500));
        assert!(!trigger.accept(520));
        assert!(!trigger.accept(540));
        // Window is measured from 500, not from the bounces
        assert!(trigger.accept(550));
    }

    #[test]
    fn test_edges_right_after_boot_are_suppressed() {
        let trigger = NeedleTrigger::new();
        assert!(!trigger.accept(10));
        assert!(trigger.accept(DEBOUNCE_MS));
    }

    #[test]
    fn test_millisecond_wraparound() {
        let trigger = NeedleTrigger::new();
        assert!(trigger.accept(u32::MAX - 10));
        assert!(!trigger.accept(20));
        assert!(trigger.accept(40));
    }
}
