//! Stitch command model

use tambour_hal::{Axis, AxisMask};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single relative hoop move, executed on one needle trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StitchCommand {
    /// Signed X displacement in steps
    pub steps_x: i32,
    /// Signed Y displacement in steps
    pub steps_y: i32,
    /// Requested needle speed. Carried through the pipeline but not
    /// consumed by the burst executor.
    pub z_speed_rpm: u32,
}

impl StitchCommand {
    /// Create a stitch command
    pub const fn new(steps_x: i32, steps_y: i32, z_speed_rpm: u32) -> Self {
        Self {
            steps_x,
            steps_y,
            z_speed_rpm,
        }
    }

    /// Absolute step counts `(dx, dy)`
    pub const fn step_counts(&self) -> (u32, u32) {
        (self.steps_x.unsigned_abs(), self.steps_y.unsigned_abs())
    }

    /// Direction mask: an axis bit is set when that axis moves negative
    pub fn direction_mask(&self) -> AxisMask {
        let mut mask = AxisMask::EMPTY;
        if self.steps_x < 0 {
            mask = mask.with(Axis::X);
        }
        if self.steps_y < 0 {
            mask = mask.with(Axis::Y);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_mask() {
        let cmd = StitchCommand::new(-5, 5, 0);
        let dir = cmd.direction_mask();
        assert!(dir.contains(Axis::X));
        assert!(!dir.contains(Axis::Y));

        assert_eq!(
            StitchCommand::new(3, -1, 0).direction_mask(),
            AxisMask::EMPTY.with(Axis::Y)
        );
        assert_eq!(StitchCommand::new(0, 0, 0).direction_mask(), AxisMask::EMPTY);
    }

    #[test]
    fn test_step_counts_handle_extremes() {
        let cmd = StitchCommand::new(i32::MIN, -7, 900);
        assert_eq!(cmd.step_counts(), (2_147_483_648, 7));
        assert_eq!(StitchCommand::default().step_counts(), (0, 0));
    }
}
