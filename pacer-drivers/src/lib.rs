//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pacer-core, written against the embedded-hal 1.0 traits so they
//! stay portable across HALs:
//!
//! - IMU drivers (LSM6DS-family accelerometer over I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod imu;
