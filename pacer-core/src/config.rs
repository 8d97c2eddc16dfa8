//! Tuning constants and calibration for the step counter
//!
//! All values are hand-tuned for the reference hardware (LSM6DS-class
//! accelerometer, 12-bit ADC joystick/potentiometer).

/// Depth of the per-axis moving-average filter
pub const FILTER_DEPTH: usize = 20;

/// Baseline value the filter buffers are pre-filled with, so early
/// averages do not show a cold-start transient toward zero
pub const FILTER_BASELINE: i16 = 9310;

/// Raw-axis magnitude threshold for orientation detection
pub const ORIENTATION_THRESHOLD: i16 = 16000;

/// Hysteresis band over the squared magnitude: values inside
/// [LOWER_THRESHOLD, UPPER_THRESHOLD] re-arm the step detector
pub const LOWER_THRESHOLD: u64 = 225_000_000;
pub const UPPER_THRESHOLD: u64 = 305_000_000;

/// Step goal bounds
pub const MIN_GOAL: u16 = 500;
pub const MAX_GOAL: u16 = 15000;
pub const DEFAULT_GOAL: u16 = 1000;

/// Distance covered per step, in centimetres
pub const STEP_LENGTH_CM: u32 = 90;

/// Steps added per UP button press
pub const BUTTON_STEP_INCREMENT: u16 = 10;

/// Maximum test-mode step change per tick, in per-mille of the goal
pub const MAX_STEP_CHANGE_PER_TICK: u16 = 15;

/// Joystick click hold time for a long press (ms)
pub const HOLD_TIME_MS: u32 = 1000;

/// Window for two presses to count as a double press (ms, strict)
pub const DOUBLE_PRESS_THRESHOLD_MS: u32 = 500;

/// Screen navigation ignores input for this many task runs after a
/// transition, to prevent rapid flipping
pub const NAV_COOLDOWN_TICKS: u8 = 2;

/// Step detection is suppressed for this long after startup while the
/// filters settle (ms)
pub const STEP_WARMUP_MS: u32 = 500;

/// Minimum joystick displacement for test-mode step changes (%)
pub const TEST_MODE_DEADZONE_PERCENT: u8 = 30;

/// Minimum X displacement to change screens (%)
pub const NAV_THRESHOLD_PERCENT: u8 = 75;

/// Minimum upward Y displacement to toggle display units (%)
pub const DISPLAY_TOGGLE_THRESHOLD: u8 = 90;

/// Periodic task periods in scheduler ticks (1 tick = 1 ms)
pub const TASK_BUTTON_PERIOD_TICKS: u32 = 10;
pub const TASK_DISPLAY_PERIOD_TICKS: u32 = 100;
pub const TASK_JOYSTICK_PERIOD_TICKS: u32 = 50;
pub const TASK_SERIAL_PERIOD_TICKS: u32 = 100;
pub const TASK_STEP_PERIOD_TICKS: u32 = 50;
pub const TASK_TEST_PERIOD_TICKS: u32 = 50;
pub const TASK_BUZZER_PERIOD_TICKS: u32 = 50;
pub const TASK_ACCELEROMETER_PERIOD_TICKS: u32 = 40;
pub const TASK_LED_PERIOD_TICKS: u32 = 100;

/// ADC calibration for the joystick axes and potentiometer
///
/// Centre values come from measuring the joystick at rest; min/max are
/// the observed ADC extremes. The deadband absorbs centre jitter when
/// deriving a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickCalibration {
    pub x_centre: u16,
    pub y_centre: u16,
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    pub pot_min: u16,
    pub pot_max: u16,
    /// Half-width of the at-rest band around each centre
    pub centre_deadband: u16,
}

impl Default for JoystickCalibration {
    fn default() -> Self {
        Self {
            x_centre: 2185,
            y_centre: 2265,
            x_min: 190,
            x_max: 4085,
            y_min: 295,
            y_max: 4085,
            pot_min: 125,
            pot_max: 4095,
            centre_deadband: 100,
        }
    }
}
