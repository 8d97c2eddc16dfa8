//! Hardware abstraction traits
//!
//! The seams between the core logic and hardware-specific
//! implementations.

pub mod motion;

pub use motion::{MotionSensor, SensorUnavailable};
