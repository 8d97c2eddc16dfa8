//! Debug telemetry record and wire format
//!
//! The field order and names of the formatted line are a compatibility
//! surface for the host-side plotter; framing (prefix, CRLF) belongs to
//! the transport.

use core::fmt::Write;

use heapless::String;

use crate::motion::FilteredSample;

/// Maximum formatted line length
pub const LINE_CAPACITY: usize = 64;

/// One filtered-acceleration snapshot for the debug stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryRecord {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub magnitude_squared: u64,
}

impl From<FilteredSample> for TelemetryRecord {
    fn from(sample: FilteredSample) -> Self {
        Self {
            x: sample.x,
            y: sample.y,
            z: sample.z,
            magnitude_squared: sample.magnitude_squared,
        }
    }
}

impl TelemetryRecord {
    /// Format as `ACC_X:<int>,ACC_Y:<int>,ACC_Z:<int>,MAG:<uint64>`
    pub fn format_line(&self) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        // Capacity is sized for worst-case field widths; write cannot fail
        let _ = write!(
            line,
            "ACC_X:{},ACC_Y:{},ACC_Z:{},MAG:{}",
            self.x, self.y, self.z, self.magnitude_squared
        );
        line
    }
}
