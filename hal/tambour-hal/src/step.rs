//! Step pulse actuation primitive
//!
//! This is the lowest level of motion output: it does not know about
//! timing, it only asserts and deasserts lines. Pulse width and step rate
//! are the caller's responsibility.

use crate::axis::AxisMask;

/// Multi-axis step/direction line driver
pub trait StepActuator {
    /// Set direction lines from `dir_mask` (bit set = negative direction),
    /// then assert the step line of every axis in `step_mask`
    fn step(&mut self, step_mask: AxisMask, dir_mask: AxisMask);

    /// Deassert all step lines
    fn unstep(&mut self);
}

impl<A: StepActuator + ?Sized> StepActuator for &mut A {
    fn step(&mut self, step_mask: AxisMask, dir_mask: AxisMask) {
        (**self).step(step_mask, dir_mask)
    }

    fn unstep(&mut self) {
        (**self).unstep()
    }
}
