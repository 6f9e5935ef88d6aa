//! RP2040-specific HAL for the embroidery firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `tambour-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO output lines (implements `tambour_hal::OutputPin`)
//! - Monotonic clock on top of `embassy-time` (implements `tambour_hal::Clock`)
//! - Dynamic pin allocation for config-driven setup

#![no_std]

pub mod clock;
pub mod gpio;
pub mod pins;

// Re-export shared traits from tambour-hal for convenience
pub use tambour_hal::{Clock, OutputPin};
