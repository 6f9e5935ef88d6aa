//! Concrete stitch pipeline types for this board
//!
//! Embassy tasks cannot be generic, so the controller and worker are
//! pinned to the RP2040 GPIO actuator, embassy delay and uptime clock.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;

use tambour_core::{StitchController, StitchWorker};
use tambour_drivers::stepper::GpioStepActuator;
use tambour_hal_rp2040::clock::EmbassyClock;
use tambour_hal_rp2040::gpio::GpioOutput;

/// Controller shared between both cores and the sensor interrupt executor
pub type Controller = StitchController<CriticalSectionRawMutex>;

/// X/Y step-dir lines on plain GPIO
pub type Actuator = GpioStepActuator<GpioOutput<'static>>;

/// The single queue consumer, run on core 1
pub type Worker = StitchWorker<'static, CriticalSectionRawMutex, Actuator, Delay, EmbassyClock>;
