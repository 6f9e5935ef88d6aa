//! Built-in stitch patterns
//!
//! Used by the firmware's test mode to exercise the pipeline without an
//! upstream command source.

use heapless::Vec;

use crate::stitch::StitchCommand;

/// Longest pattern that can be generated
pub const MAX_PATTERN_STITCHES: usize = 64;

/// Stitch pattern buffer
pub type Pattern = Vec<StitchCommand, MAX_PATTERN_STITCHES>;

/// Pattern generation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// Side or stitch length is not positive
    InvalidDimensions,
    /// Pattern needs more than [`MAX_PATTERN_STITCHES`] stitches
    TooLong,
}

/// Closed square of running stitches, counter-clockwise from the origin
///
/// Each side is split into stitches of `stitch_len` steps; the last stitch
/// of a side takes the remainder. The pattern returns to its start point.
pub fn running_square(side: i32, stitch_len: i32, z_rpm: u32) -> Result<Pattern, PatternError> {
    if side <= 0 || stitch_len <= 0 {
        return Err(PatternError::InvalidDimensions);
    }

    let mut pattern = Pattern::new();
    for (ux, uy) in [(1, 0), (0, 1), (-1, 0), (0, -1)] {
        let mut remaining = side;
        while remaining > 0 {
            let len = remaining.min(stitch_len);
            remaining -= len;
            pattern
                .push(StitchCommand::new(ux * len, uy * len, z_rpm))
                .map_err(|_| PatternError::TooLong)?;
        }
    }
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_closes() {
        let pattern = running_square(100, 30, 600).unwrap();

        // 30 + 30 + 30 + 10 per side
        assert_eq!(pattern.len(), 16);
        let (x, y) = pattern
            .iter()
            .fold((0, 0), |(x, y), s| (x + s.steps_x, y + s.steps_y));
        assert_eq!((x, y), (0, 0));
        assert!(pattern.iter().all(|s| s.z_speed_rpm == 600));
        assert_eq!(pattern[3], StitchCommand::new(10, 0, 600));
        assert_eq!(pattern[4], StitchCommand::new(0, 30, 600));
    }

    #[test]
    fn test_square_limits() {
        assert_eq!(
            running_square(0, 10, 0).unwrap_err(),
            PatternError::InvalidDimensions
        );
        assert_eq!(
            running_square(1000, 1, 0).unwrap_err(),
            PatternError::TooLong
        );
    }
}
