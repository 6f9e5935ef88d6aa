//! Needle position sensor task
//!
//! Runs on the high-priority interrupt executor. Each edge is handed to the
//! controller straight away; the controller debounces and wakes the worker.
//! Nothing on this path logs or blocks.

use embassy_rp::gpio::Input;

use tambour_hal_rp2040::clock::EmbassyClock;
use tambour_hal_rp2040::Clock;

use crate::stitcher::Controller;

/// Needle sensor edge handler
///
/// The needle reaching its reference point is a falling edge on the
/// logical signal. An inverted pin sees that as a physical rising edge.
#[embassy_executor::task]
pub async fn needle_sensor_task(
    mut sensor: Input<'static>,
    inverted: bool,
    controller: &'static Controller,
) {
    let clock = EmbassyClock;

    loop {
        if inverted {
            sensor.wait_for_rising_edge().await;
        } else {
            sensor.wait_for_falling_edge().await;
        }
        controller.on_needle_edge(clock.now_ms());
    }
}
