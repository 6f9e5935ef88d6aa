//! Tambour - Needle-Synchronised Embroidery Firmware
//!
//! Main firmware binary for RP2040-based embroidery controllers. Stitch
//! moves queued by the pattern source are executed one per needle cycle,
//! released by the needle position sensor.
//!
//! Execution contexts:
//! - Core 0, interrupt executor (SWI_IRQ_1): needle sensor edges
//! - Core 0, thread executor: pattern source and status reporting
//! - Core 1, thread executor: the stitch worker and its burst moves

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tambour_core::config::{AxisHwConfig, MachineConfig, PinConfig};
use tambour_core::motion::BurstExecutor;
use tambour_core::NeedleSensor;
use tambour_drivers::stepper::{AxisLines, GpioStepActuator};
use tambour_hal_rp2040::clock::EmbassyClock;
use tambour_hal_rp2040::gpio::GpioOutput;
use tambour_hal_rp2040::pin_bank;
use tambour_hal_rp2040::pins::{PinBank, PinError};

use crate::config::load_config;
use crate::stitcher::{Actuator, Controller};

mod config;
mod stitcher;
mod tasks;

/// The one stitch controller
static CONTROLLER: Controller = Controller::new();

/// High-priority executor for needle sensor edges
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

// Core 1 runs only the stitch worker
static mut CORE1_STACK: Stack<4096> = Stack::new();
static EXECUTOR_CORE1: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tambour firmware starting...");

    let p = embassy_rp::init(Default::default());
    let core1 = p.CORE1;
    let mut pins = pin_bank!(p);
    info!("Peripherals initialized");

    let config = load_config();

    let actuator = unwrap!(build_actuator(&mut pins, &config));
    info!(
        "Steppers: X step={} dir={}, Y step={} dir={}",
        config.x.step_pin.pin, config.x.dir_pin.pin, config.y.step_pin.pin, config.y.dir_pin.pin
    );

    // Needle sensor input, if one is configured and its pin is free
    let sensor = config
        .embroidery
        .needle_sensor_pin
        .and_then(|pin_cfg| match sensor_input(&mut pins, pin_cfg) {
            Ok(input) => Some((input, pin_cfg)),
            Err(e) => {
                error!("Needle sensor gpio{} unavailable: {}", pin_cfg.pin, e);
                None
            }
        });

    let attached = if sensor.is_some() {
        NeedleSensor::Attached
    } else {
        warn!("No needle sensor configured, stitch controller stays disabled");
        NeedleSensor::Unconfigured
    };

    let executor = BurstExecutor::new(actuator, Delay, EmbassyClock);
    let worker = unwrap!(CONTROLLER.begin(attached, executor));

    // Sensor edges preempt everything else on core 0
    if let Some((input, pin_cfg)) = sensor {
        interrupt::SWI_IRQ_1.set_priority(Priority::P2);
        let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
        high.spawn(tasks::needle_sensor_task(input, pin_cfg.inverted, &CONTROLLER))
            .unwrap();

        if config.embroidery.enable_on_start {
            CONTROLLER.enable(true);
            info!("Needle sync enabled on gpio{}", pin_cfg.pin);
        }
    }

    spawn_core1(
        core1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor = EXECUTOR_CORE1.init(Executor::new());
            executor.run(|spawner| spawner.spawn(tasks::stitch_worker_task(worker)).unwrap())
        },
    );

    spawner.spawn(tasks::status_task(&CONTROLLER)).unwrap();
    if config.embroidery.test_pattern {
        spawner.spawn(tasks::test_pattern_task(&CONTROLLER)).unwrap();
    }

    info!("All tasks spawned, firmware running");
}

/// Claim the X and Y step/dir lines named by the config
fn build_actuator(pins: &mut PinBank, config: &MachineConfig) -> Result<Actuator, PinError> {
    let x = axis_lines(pins, &config.x)?;
    let y = axis_lines(pins, &config.y)?;
    Ok(GpioStepActuator::new(x, y))
}

fn axis_lines(
    pins: &mut PinBank,
    hw: &AxisHwConfig,
) -> Result<AxisLines<GpioOutput<'static>>, PinError> {
    let step = GpioOutput::new(pins.take(hw.step_pin.pin)?);
    let dir = GpioOutput::new(pins.take(hw.dir_pin.pin)?);
    Ok(AxisLines::new(step, dir, hw.step_pin.inverted, hw.dir_pin.inverted))
}

fn sensor_input(pins: &mut PinBank, pin_cfg: PinConfig) -> Result<Input<'static>, PinError> {
    let pull = if pin_cfg.pull_up { Pull::Up } else { Pull::None };
    Ok(Input::new(pins.take(pin_cfg.pin)?, pull))
}
