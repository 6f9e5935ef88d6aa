//! Step actuator implementations

pub mod gpio;

pub use gpio::{AxisLines, GpioStepActuator};
