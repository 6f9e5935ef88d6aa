//! Burst move executor
//!
//! A burst move runs one stitch as a fixed-rate, open-loop pulse train.
//! Every tick pulses each axis that has not yet reached its target, so the
//! longer axis pulses on every tick and the shorter axis pulses on the
//! first `min(dx, dy)` ticks. There is no acceleration: every tick is one
//! step pulse of [`STEP_PULSE_US`] followed by [`STEP_INTERVAL_US`] of
//! idle time.

use embedded_hal_async::delay::DelayNs;
use tambour_hal::{Axis, AxisMask, Clock, StepActuator};

use crate::stitch::StitchCommand;

/// Step pulse high time in microseconds
pub const STEP_PULSE_US: u32 = 5;

/// Idle time between step pulses in microseconds
pub const STEP_INTERVAL_US: u32 = 2000;

/// Per-tick step masks for one stitch
///
/// Iterating yields exactly `max(dx, dy)` masks. `dx` and `dy` are compared
/// against their own counters each tick.
#[derive(Debug, Clone)]
pub struct BurstPlan {
    dx: u32,
    dy: u32,
    cx: u32,
    cy: u32,
    remaining: u32,
    dir_mask: AxisMask,
}

impl BurstPlan {
    /// Plan the pulse train for `cmd`
    pub fn new(cmd: &StitchCommand) -> Self {
        let (dx, dy) = cmd.step_counts();
        Self {
            dx,
            dy,
            cx: 0,
            cy: 0,
            remaining: dx.max(dy),
            dir_mask: cmd.direction_mask(),
        }
    }

    /// Direction mask held for the whole move
    pub fn dir_mask(&self) -> AxisMask {
        self.dir_mask
    }
}

impl Iterator for BurstPlan {
    type Item = AxisMask;

    fn next(&mut self) -> Option<AxisMask> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mut step_mask = AxisMask::EMPTY;
        if self.cx < self.dx {
            step_mask.set(Axis::X);
            self.cx += 1;
        }
        if self.cy < self.dy {
            step_mask.set(Axis::Y);
            self.cy += 1;
        }
        Some(step_mask)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

/// Summary of one executed burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstReport {
    /// Ticks executed (calls to `step`)
    pub pulses: u32,
    /// Ticks that pulsed X
    pub x_pulses: u32,
    /// Ticks that pulsed Y
    pub y_pulses: u32,
    /// Wall time of the burst in microseconds
    pub elapsed_us: u64,
}

impl BurstReport {
    fn record(&mut self, step_mask: AxisMask) {
        self.pulses += 1;
        if step_mask.contains(Axis::X) {
            self.x_pulses += 1;
        }
        if step_mask.contains(Axis::Y) {
            self.y_pulses += 1;
        }
    }
}

/// Drives a [`StepActuator`] through burst moves
///
/// Owns the actuator, the delay provider used for pulse timing, and the
/// clock used to measure each burst.
pub struct BurstExecutor<A, D, C> {
    actuator: A,
    delay: D,
    clock: C,
}

impl<A, D, C> BurstExecutor<A, D, C>
where
    A: StepActuator,
    D: DelayNs,
    C: Clock,
{
    /// Create an executor
    pub fn new(actuator: A, delay: D, clock: C) -> Self {
        Self {
            actuator,
            delay,
            clock,
        }
    }

    /// Run one stitch to completion
    ///
    /// Returns only after the last inter-step interval has elapsed.
    pub async fn execute(&mut self, cmd: &StitchCommand) -> BurstReport {
        let start_us = self.clock.now_us();
        let plan = BurstPlan::new(cmd);
        let dir_mask = plan.dir_mask();
        let mut report = BurstReport::default();

        for step_mask in plan {
            self.actuator.step(step_mask, dir_mask);
            self.delay.delay_us(STEP_PULSE_US).await;
            self.actuator.unstep();
            self.delay.delay_us(STEP_INTERVAL_US).await;
            report.record(step_mask);
        }

        report.elapsed_us = self.clock.now_us().saturating_sub(start_us);
        report
    }

    /// Borrow the actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Take the parts back
    pub fn into_parts(self) -> (A, D, C) {
        (self.actuator, self.delay, self.clock)
    }
}
