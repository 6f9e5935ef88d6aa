//! GPIO output lines

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;

use tambour_hal::OutputPin;

/// Push-pull GPIO output
///
/// Wraps an `embassy_rp` output so step and direction lines can be handed
/// to `tambour-drivers` without those crates knowing about the RP2040.
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Configure `pin` as an output, initially low
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
