//! Fixed-depth moving-average filter

use crate::config::{FILTER_BASELINE, FILTER_DEPTH};

/// Circular-buffer smoother over the last [`FILTER_DEPTH`] samples
///
/// The buffer starts pre-filled with [`FILTER_BASELINE`] rather than
/// zero, so the first averages are close to a resting-magnitude output
/// instead of ramping up from nothing.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AveragingFilter {
    buffer: [i16; FILTER_DEPTH],
    /// Next slot to overwrite
    index: usize,
}

impl AveragingFilter {
    pub const fn new() -> Self {
        Self {
            buffer: [FILTER_BASELINE; FILTER_DEPTH],
            index: 0,
        }
    }

    /// Insert a new sample and return the average of all slots
    pub fn apply(&mut self, new_value: i16) -> i16 {
        self.buffer[self.index] = new_value;
        self.index = (self.index + 1) % FILTER_DEPTH;

        let sum: i32 = self.buffer.iter().map(|&v| v as i32).sum();
        (sum / FILTER_DEPTH as i32) as i16
    }
}

impl Default for AveragingFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Squared magnitude of a 3D vector, computed without a square root
///
/// Monotonic in the true magnitude, which is all the step detector
/// needs, and avoids floating point entirely.
pub fn magnitude_squared(x: i16, y: i16, z: i16) -> u64 {
    let sum = (x as i64) * (x as i64) + (y as i64) * (y as i64) + (z as i64) * (z as i64);
    sum as u64
}
