//! Tambour Hardware Abstraction Layer
//!
//! This crate defines the hardware-facing traits the stitch pipeline is
//! written against. Chip-specific HALs implement them, and host tests
//! implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tambour-firmware)         │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │  tambour-core   │   │ tambour-drivers │
//! └─────────────────┘   └─────────────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tambour-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ tambour-hal-rp2040│
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`step::StepActuator`] - Multi-axis step/direction pulse primitive
//! - [`clock::Clock`] - Monotonic millisecond and microsecond time
//! - [`gpio::OutputPin`] - Digital output

#![no_std]
#![deny(unsafe_code)]

pub mod axis;
pub mod clock;
pub mod gpio;
pub mod step;

pub use axis::{Axis, AxisMask};
pub use clock::Clock;
pub use gpio::OutputPin;
pub use step::StepActuator;
