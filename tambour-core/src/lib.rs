//! Board-agnostic core logic for the Tambour embroidery firmware
//!
//! This crate contains the needle-synchronised stitch pipeline without any
//! dependency on a specific chip:
//!
//! - Stitch command model
//! - Burst move executor (interleaved two-axis step generation)
//! - Needle sensor trigger with debounce
//! - Stitch controller (bounded queue, trigger signal, enable gate)
//! - Worker that drains one stitch per needle trigger
//! - Configuration types and the `machine.toml` parser
//! - Test pattern generation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod motion;
pub mod pattern;
pub mod stitch;
pub mod trigger;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ControllerError, ControllerStats, NeedleSensor, StitchController};
pub use stitch::StitchCommand;
pub use trigger::TriggerOutcome;
pub use worker::{StitchWorker, WorkerOutcome};
