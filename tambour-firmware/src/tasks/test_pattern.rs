//! Built-in test pattern
//!
//! Sews a square of running stitches over and over. The queue fills within
//! the first lap, after which `enqueue` paces this task to the needle.

use defmt::*;

use tambour_core::pattern::running_square;

use crate::stitcher::Controller;

/// Square side length in steps
const SIDE_STEPS: i32 = 400;

/// Running stitch length in steps
const STITCH_STEPS: i32 = 40;

/// Needle motor speed hint
const Z_SPEED_RPM: u32 = 600;

/// Test pattern task - queues the square forever, paced by the queue
#[embassy_executor::task]
pub async fn test_pattern_task(controller: &'static Controller) {
    let pattern = match running_square(SIDE_STEPS, STITCH_STEPS, Z_SPEED_RPM) {
        Ok(pattern) => pattern,
        Err(e) => {
            error!("Test pattern rejected: {}", e);
            return;
        }
    };

    info!("Test pattern started: {} stitches per lap", pattern.len());

    let mut laps: u32 = 0;
    loop {
        for stitch in pattern.iter() {
            if !controller.enqueue(*stitch).await {
                error!("Stitch controller not started, test pattern stopped");
                return;
            }
        }
        laps = laps.wrapping_add(1);
        info!("Test pattern lap {} queued", laps);
    }
}
