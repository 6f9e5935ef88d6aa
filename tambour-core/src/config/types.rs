//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }
}

/// Step and direction lines of one hoop axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisHwConfig {
    /// Step pulse pin
    pub step_pin: PinConfig,
    /// Direction pin; active level means negative travel
    pub dir_pin: PinConfig,
}

/// Needle synchronisation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmbroideryConfig {
    /// Needle position sensor input. `None` leaves the stitch
    /// controller permanently disabled.
    pub needle_sensor_pin: Option<PinConfig>,
    /// Enable needle triggering as soon as the sensor is wired
    pub enable_on_start: bool,
    /// Queue a built-in test pattern at boot
    pub test_pattern: bool,
}

impl Default for EmbroideryConfig {
    fn default() -> Self {
        Self {
            needle_sensor_pin: None,
            enable_on_start: true,
            test_pattern: false,
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Needle synchronisation
    pub embroidery: EmbroideryConfig,
    /// Hoop X axis
    pub x: AxisHwConfig,
    /// Hoop Y axis
    pub y: AxisHwConfig,
}

impl Default for MachineConfig {
    /// SKR Pico stepper X and Y sockets, no needle sensor
    fn default() -> Self {
        Self {
            embroidery: EmbroideryConfig::default(),
            x: AxisHwConfig {
                step_pin: PinConfig::new(11),
                dir_pin: PinConfig::new(10),
            },
            y: AxisHwConfig {
                step_pin: PinConfig::new(6),
                dir_pin: PinConfig::new(5),
            },
        }
    }
}

impl MachineConfig {
    /// Every configured pin, needle sensor first if present
    pub fn pins(&self) -> impl Iterator<Item = PinConfig> {
        let axes = [
            self.x.step_pin,
            self.x.dir_pin,
            self.y.step_pin,
            self.y.dir_pin,
        ];
        self.embroidery
            .needle_sensor_pin
            .into_iter()
            .chain(axes)
    }

    /// First GPIO number used by more than one function, if any
    pub fn find_pin_conflict(&self) -> Option<u8> {
        let mut used: u32 = 0;
        for pin in self.pins() {
            let Some(bit) = 1u32.checked_shl(u32::from(pin.pin)) else {
                continue;
            };
            if used & bit != 0 {
                return Some(pin.pin);
            }
            used |= bit;
        }
        None
    }
}
