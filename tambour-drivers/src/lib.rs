//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tambour-hal:
//!
//! - Step actuators (step/dir GPIO lines per axis)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod stepper;
