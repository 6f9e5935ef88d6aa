//! Stitch worker
//!
//! The worker is the only consumer of the stitch queue. Each iteration:
//!
//! 1. Waiting: park on the needle trigger signal, with no timeout.
//! 2. Draining: take at most one stitch without waiting.
//! 3. Executing: run the burst move to completion, then go back to 1.
//!
//! A wake with an empty queue (a needle cycle with nothing to sew, or a
//! trigger that raced ahead of an enqueue) is reported and otherwise
//! ignored. Burst moves block on timed delays, so the worker must run in
//! its own low-priority context, never in interrupt context.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use tambour_hal::{Clock, StepActuator};

use crate::controller::StitchController;
use crate::motion::{BurstExecutor, BurstReport};
use crate::stitch::StitchCommand;

/// Result of one worker iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkerOutcome {
    /// A stitch was executed
    Executed {
        command: StitchCommand,
        report: BurstReport,
    },
    /// Woken by the needle, but nothing was queued
    QueueEmpty,
}

/// The single consumer of a [`StitchController`]'s queue
///
/// Obtained from [`StitchController::begin`].
pub struct StitchWorker<'c, M: RawMutex, A, D, C> {
    controller: &'c StitchController<M>,
    executor: BurstExecutor<A, D, C>,
}

impl<'c, M: RawMutex, A, D, C> StitchWorker<'c, M, A, D, C> {
    pub(crate) fn new(controller: &'c StitchController<M>, executor: BurstExecutor<A, D, C>) -> Self {
        Self {
            controller,
            executor,
        }
    }

    /// Burst executor owned by this worker
    pub fn executor(&self) -> &BurstExecutor<A, D, C> {
        &self.executor
    }
}

impl<'c, M, A, D, C> StitchWorker<'c, M, A, D, C>
where
    M: RawMutex,
    A: StepActuator,
    D: DelayNs,
    C: Clock,
{
    /// Wait for one needle trigger and service it
    pub async fn run_once(&mut self) -> WorkerOutcome {
        self.controller.wait_for_trigger().await;

        match self.controller.try_dequeue() {
            Some(command) => {
                let report = self.executor.execute(&command).await;
                self.controller.record_executed();
                WorkerOutcome::Executed { command, report }
            }
            None => {
                self.controller.record_empty_wake();
                WorkerOutcome::QueueEmpty
            }
        }
    }
}
