//! Motion sensor abstraction

use crate::motion::RawAcceleration;

/// The sensor could not be read (bus error, not responding)
///
/// The core's algorithms assume valid input; a failed read is surfaced
/// here at the collaborator boundary and the engine keeps the previous
/// sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorUnavailable;

/// Three-axis accelerometer as seen by the pipeline
pub trait MotionSensor {
    /// Read the current raw axis triple
    fn read_acceleration(&mut self) -> Result<RawAcceleration, SensorUnavailable>;
}
