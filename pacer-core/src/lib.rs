//! Board-agnostic core logic for the Pacer step counter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Cooperative periodic task scheduling
//! - Accelerometer conditioning pipeline (bias correction, filtering,
//!   squared-magnitude computation)
//! - Hysteresis step detection
//! - Goal tracking and goal-setting mode
//! - Test mode, screen navigation, press tracking
//! - Hardware abstraction traits (motion sensor)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod goal;
pub mod joystick;
pub mod motion;
pub mod press;
pub mod scheduler;
pub mod screen;
pub mod steps;
pub mod telemetry;
pub mod test_mode;
pub mod traits;
