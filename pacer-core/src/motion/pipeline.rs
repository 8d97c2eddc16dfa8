//! Accelerometer pipeline: orientation bias correction, per-axis
//! filtering, squared-magnitude computation
//!
//! The sensor's resting bias depends on which way the device is worn,
//! so a hand-tuned additive offset is selected from the raw reading
//! before filtering. The corrected axes are each smoothed by their own
//! [`AveragingFilter`] and combined into a cached [`FilteredSample`].

use super::filter::{magnitude_squared, AveragingFilter};
use crate::config::ORIENTATION_THRESHOLD;

/// Raw signed axis triple as read from the sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawAcceleration {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Filtered axis values and their squared magnitude
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilteredSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub magnitude_squared: u64,
}

/// Additive per-axis bias correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisOffset {
    pub dx: i16,
    pub dy: i16,
    pub dz: i16,
}

impl AxisOffset {
    pub const ZERO: Self = Self { dx: 0, dy: 0, dz: 0 };

    const fn new(dx: i16, dy: i16, dz: i16) -> Self {
        Self { dx, dy, dz }
    }
}

/// Which raw-axis test selects an orientation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisTest {
    XAbove,
    XBelow,
    YAbove,
    YBelow,
    ZAbove,
}

impl AxisTest {
    fn matches(self, raw: &RawAcceleration) -> bool {
        match self {
            AxisTest::XAbove => raw.x > ORIENTATION_THRESHOLD,
            AxisTest::XBelow => raw.x < -ORIENTATION_THRESHOLD,
            AxisTest::YAbove => raw.y > ORIENTATION_THRESHOLD,
            AxisTest::YBelow => raw.y < -ORIENTATION_THRESHOLD,
            AxisTest::ZAbove => raw.z > ORIENTATION_THRESHOLD,
        }
    }
}

/// Orientation correction rules, evaluated in order with first match
/// winning. Order is significant: a tilted reading can satisfy more
/// than one predicate. "z below" deliberately has no rule; the zero
/// offset is the fallback.
const ORIENTATION_RULES: &[(AxisTest, AxisOffset)] = &[
    (AxisTest::XAbove, AxisOffset::new(100, -70, -500)),
    (AxisTest::XBelow, AxisOffset::new(100, 0, 300)),
    (AxisTest::YAbove, AxisOffset::new(500, -200, 600)),
    (AxisTest::YBelow, AxisOffset::new(-65, 0, -225)),
    (AxisTest::ZAbove, AxisOffset::new(150, -110, 0)),
];

/// First-match orientation offset for a raw reading
pub fn orientation_offset(raw: &RawAcceleration) -> AxisOffset {
    for (test, offset) in ORIENTATION_RULES {
        if test.matches(raw) {
            return *offset;
        }
    }
    AxisOffset::ZERO
}

/// Per-axis filtering pipeline with a cached latest result
#[derive(Debug, Clone, Default)]
pub struct AccelPipeline {
    x_filter: AveragingFilter,
    y_filter: AveragingFilter,
    z_filter: AveragingFilter,
    latest: FilteredSample,
}

impl AccelPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Correct, filter, and cache one raw reading
    pub fn execute(&mut self, raw: RawAcceleration) -> FilteredSample {
        let offset = orientation_offset(&raw);

        let ax = raw.x.saturating_add(offset.dx);
        let ay = raw.y.saturating_add(offset.dy);
        let az = raw.z.saturating_add(offset.dz);

        let fx = self.x_filter.apply(ax);
        let fy = self.y_filter.apply(ay);
        let fz = self.z_filter.apply(az);

        self.latest = FilteredSample {
            x: fx,
            y: fy,
            z: fz,
            magnitude_squared: magnitude_squared(fx, fy, fz),
        };
        self.latest
    }

    /// Most recent filtered sample
    ///
    /// May be one accelerometer period old relative to the caller if
    /// task ordering has not refreshed it yet this iteration.
    pub fn latest(&self) -> FilteredSample {
        self.latest
    }
}
