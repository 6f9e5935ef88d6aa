//! Host-side test doubles for the hardware traits

use core::cell::Cell;
use core::future::{poll_fn, Future};
use core::pin::Pin;
use core::task::Poll;
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;
use tambour_hal::{AxisMask, Clock, StepActuator};

/// One call into the actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuation {
    Step(AxisMask, AxisMask),
    Unstep,
}

/// Actuator that records every call
#[derive(Debug, Default)]
pub struct RecordingActuator {
    pub log: Vec<Actuation>,
}

impl RecordingActuator {
    /// Number of `step` calls so far
    pub fn steps(&self) -> usize {
        self.log
            .iter()
            .filter(|a| matches!(a, Actuation::Step(..)))
            .count()
    }
}

impl StepActuator for RecordingActuator {
    fn step(&mut self, step_mask: AxisMask, dir_mask: AxisMask) {
        self.log.push(Actuation::Step(step_mask, dir_mask));
    }

    fn unstep(&mut self) {
        self.log.push(Actuation::Unstep);
    }
}

/// Simulated microsecond timeline shared by [`SimDelay`] and the clock
#[derive(Debug, Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

impl Clock for SimTime {
    fn now_ms(&self) -> u32 {
        (self.0.get() / 1000) as u32
    }

    fn now_us(&self) -> u64 {
        self.0.get()
    }
}

/// Delay that completes immediately and advances simulated time
#[derive(Debug)]
pub struct SimDelay {
    time: SimTime,
    pub delays_us: Vec<u32>,
}

impl SimDelay {
    pub fn new(time: &SimTime) -> Self {
        Self {
            time: time.clone(),
            delays_us: Vec::new(),
        }
    }
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.time.advance_us(u64::from(ns / 1000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.delays_us.push(us);
        self.time.advance_us(u64::from(us));
    }
}

/// Poll a pinned future exactly once from inside an async context
pub async fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut fut = Some(fut);
    poll_fn(|cx| {
        let f = fut.take().expect("polled twice");
        Poll::Ready(f.poll(cx))
    })
    .await
}
