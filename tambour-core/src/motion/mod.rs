//! Motion generation
//!
//! Turns stitch commands into step pulse trains.

pub mod burst;

pub use burst::{BurstExecutor, BurstPlan, BurstReport, STEP_INTERVAL_US, STEP_PULSE_US};
