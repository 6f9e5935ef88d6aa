//! Stitch controller
//!
//! The controller is the hand-off point between the three execution
//! contexts of the pipeline:
//!
//! - Producers call [`StitchController::queue_stitch`], which suspends while
//!   the queue is full. This is the only flow control.
//! - The needle sensor edge handler calls
//!   [`StitchController::on_needle_edge`] from interrupt context.
//! - The single [`StitchWorker`] waits for the trigger signal and drains
//!   one stitch per signal.
//!
//! The controller is built in a `const` context so it can live in a
//! `static` or `StaticCell` without allocation. The application constructs
//! exactly one and hands `&'static` references to the tasks that need it.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::motion::BurstExecutor;
use crate::stitch::StitchCommand;
use crate::trigger::{NeedleTrigger, TriggerOutcome};
use crate::worker::StitchWorker;

/// Stitch queue depth
pub const STITCH_QUEUE_CAPACITY: usize = 50;

/// Whether a needle sensor edge source was wired at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NeedleSensor {
    /// Sensor pin configured and its edge handler running
    Attached,
    /// No sensor pin configured; the controller stays disabled
    Unconfigured,
}

/// Controller lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// `begin` was called a second time; only one worker may exist
    AlreadyStarted,
}

/// Snapshot of the controller's diagnostic counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerStats {
    /// Stitches accepted into the queue
    pub queued: u32,
    /// Stitches executed by the worker
    pub executed: u32,
    /// Worker wakes that found the queue empty
    pub empty_wakes: u32,
    /// Edges dropped by the debounce window
    pub debounced: u32,
    /// Edges accepted while not enabled
    pub ignored: u32,
    /// Stitches currently waiting in the queue
    pub pending: usize,
}

#[derive(Debug)]
struct Counters {
    queued: AtomicU32,
    executed: AtomicU32,
    empty_wakes: AtomicU32,
    debounced: AtomicU32,
    ignored: AtomicU32,
}

impl Counters {
    const fn new() -> Self {
        Self {
            queued: AtomicU32::new(0),
            executed: AtomicU32::new(0),
            empty_wakes: AtomicU32::new(0),
            debounced: AtomicU32::new(0),
            ignored: AtomicU32::new(0),
        }
    }

    fn bump(counter: &AtomicU32) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Needle-synchronised stitch controller
pub struct StitchController<M: RawMutex> {
    queue: Channel<M, StitchCommand, STITCH_QUEUE_CAPACITY>,
    wake: Signal<M, ()>,
    trigger: NeedleTrigger,
    enabled: AtomicBool,
    started: AtomicBool,
    sensor_attached: AtomicBool,
    counters: Counters,
}

impl<M: RawMutex> StitchController<M> {
    /// Create an idle controller: not started, disabled, empty queue
    pub const fn new() -> Self {
        Self {
            queue: Channel::new(),
            wake: Signal::new(),
            trigger: NeedleTrigger::new(),
            enabled: AtomicBool::new(false),
            started: AtomicBool::new(false),
            sensor_attached: AtomicBool::new(false),
            counters: Counters::new(),
        }
    }

    /// Start the controller and hand out its one worker
    ///
    /// The returned worker must be run by a dedicated task. If `sensor` is
    /// [`NeedleSensor::Unconfigured`] the controller can never be enabled.
    pub fn begin<A, D, C>(
        &self,
        sensor: NeedleSensor,
        executor: BurstExecutor<A, D, C>,
    ) -> Result<StitchWorker<'_, M, A, D, C>, ControllerError> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(ControllerError::AlreadyStarted);
        }
        self.sensor_attached
            .store(sensor == NeedleSensor::Attached, Ordering::Release);

        #[cfg(feature = "defmt")]
        defmt::info!("Stitch controller started, sensor {}", sensor);

        Ok(StitchWorker::new(self, executor))
    }

    /// Check whether `begin` has run
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Check whether a needle sensor was wired by `begin`
    pub fn has_sensor(&self) -> bool {
        self.sensor_attached.load(Ordering::Acquire)
    }

    /// Gate whether needle edges wake the worker
    ///
    /// May be called at any time, including before `begin`. The flag only
    /// takes effect once a needle sensor is attached.
    pub fn enable(&self, state: bool) {
        self.enabled.store(state, Ordering::Release);
    }

    /// Check whether needle edges currently wake the worker
    ///
    /// Always `false` without an attached sensor, whatever `enable` set.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire) && self.has_sensor()
    }

    /// Queue a stitch for the next needle trigger
    ///
    /// Suspends without timeout while the queue is full. Returns `false`
    /// only if the controller has not been started, since nothing would
    /// ever drain the queue.
    pub async fn queue_stitch(&self, dx: i32, dy: i32, z_rpm: u32) -> bool {
        self.enqueue(StitchCommand::new(dx, dy, z_rpm)).await
    }

    /// Queue a prepared stitch command. See [`Self::queue_stitch`].
    pub async fn enqueue(&self, cmd: StitchCommand) -> bool {
        if !self.is_started() {
            return false;
        }
        self.queue.send(cmd).await;
        Counters::bump(&self.counters.queued);

        #[cfg(feature = "defmt")]
        defmt::debug!("Stitch queued: {}, {}", cmd.steps_x, cmd.steps_y);

        true
    }

    /// Needle sensor falling edge handler
    ///
    /// Safe to call from interrupt context. `now_ms` is the monotonic
    /// millisecond clock read by the caller.
    pub fn on_needle_edge(&self, now_ms: u32) -> TriggerOutcome {
        if !self.trigger.accept(now_ms) {
            Counters::bump(&self.counters.debounced);
            return TriggerOutcome::Debounced;
        }
        if !self.is_started() || !self.is_enabled() {
            Counters::bump(&self.counters.ignored);
            return TriggerOutcome::Disabled;
        }
        self.wake.signal(());
        TriggerOutcome::Signaled
    }

    /// Timestamp of the last accepted needle edge
    pub fn last_trigger_ms(&self) -> u32 {
        self.trigger.last_trigger_ms()
    }

    /// Diagnostic counters
    pub fn stats(&self) -> ControllerStats {
        let c = &self.counters;
        ControllerStats {
            queued: c.queued.load(Ordering::Relaxed),
            executed: c.executed.load(Ordering::Relaxed),
            empty_wakes: c.empty_wakes.load(Ordering::Relaxed),
            debounced: c.debounced.load(Ordering::Relaxed),
            ignored: c.ignored.load(Ordering::Relaxed),
            pending: self.queue.len(),
        }
    }

    pub(crate) async fn wait_for_trigger(&self) {
        self.wake.wait().await
    }

    pub(crate) fn try_dequeue(&self) -> Option<StitchCommand> {
        self.queue.try_receive().ok()
    }

    pub(crate) fn record_executed(&self) {
        Counters::bump(&self.counters.executed);
    }

    pub(crate) fn record_empty_wake(&self) {
        Counters::bump(&self.counters.empty_wakes);
    }

    #[cfg(test)]
    pub(crate) fn trigger_pending(&self) -> bool {
        self.wake.signaled()
    }
}

impl<M: RawMutex> Default for StitchController<M> {
    fn default() -> Self {
        Self::new()
    }
}
