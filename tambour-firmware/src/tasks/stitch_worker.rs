//! Stitch worker task
//!
//! Runs alone on core 1. Burst moves busy the executor for the whole pulse
//! train, so nothing else is scheduled there.

use defmt::*;

use tambour_core::WorkerOutcome;

use crate::stitcher::Worker;

/// Drain one stitch per needle trigger, forever
#[embassy_executor::task]
pub async fn stitch_worker_task(mut worker: Worker) {
    info!("Stitch worker started on core 1");

    loop {
        match worker.run_once().await {
            WorkerOutcome::Executed { command, report } => {
                debug!(
                    "Stitch dx={} dy={} done: {} pulses in {}us",
                    command.steps_x, command.steps_y, report.pulses, report.elapsed_us
                );
            }
            WorkerOutcome::QueueEmpty => {
                warn!("Needle trigger with empty stitch queue");
            }
        }
    }
}
