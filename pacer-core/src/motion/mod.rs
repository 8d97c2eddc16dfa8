//! Accelerometer conditioning
//!
//! Turns raw axis readings into a filtered sample with a squared
//! magnitude suitable for threshold comparison.

pub mod filter;
pub mod pipeline;

pub use filter::{magnitude_squared, AveragingFilter};
pub use pipeline::{AccelPipeline, AxisOffset, FilteredSample, RawAcceleration};
