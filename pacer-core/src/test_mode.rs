//! Test mode: joystick-driven step manipulation
//!
//! When enabled, Y-axis displacement drives the step count up and down
//! in proportion to stick force and goal size, instead of the motion
//! detector. Useful for demoing the goal/LED/buzzer behavior without
//! walking.

use crate::config::{JoystickCalibration, MAX_STEP_CHANGE_PER_TICK, TEST_MODE_DEADZONE_PERCENT};
use crate::joystick::{self, AxisDirection};
use crate::steps::StepCounter;

#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestModeController {
    enabled: bool,
}

impl TestModeController {
    pub const fn new() -> Self {
        Self { enabled: false }
    }

    /// Flip test mode; the setting persists across other mode switches
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Apply one tick of joystick-driven step change
    ///
    /// No-op unless enabled and outside goal-setting mode. Below the
    /// dead zone the stick does nothing; above it, the per-tick change
    /// scales with both displacement and goal size. Up clamps at the
    /// goal, down floors at zero.
    pub fn update(
        &mut self,
        adc_y: u16,
        cal: &JoystickCalibration,
        in_goal_setting: bool,
        goal: u16,
        counter: &mut StepCounter,
    ) {
        if !self.enabled || in_goal_setting {
            return;
        }

        let percent = joystick::y_percentage(cal, adc_y);
        if percent < TEST_MODE_DEADZONE_PERCENT {
            return;
        }

        let current = counter.get();

        let max_step_change = (goal as u32 * MAX_STEP_CHANGE_PER_TICK as u32 / 1000) as u16;
        let step_delta = (percent as u32 * max_step_change as u32 / 100) as u16;

        match joystick::y_direction(cal, adc_y) {
            AxisDirection::Up => {
                counter.set((current.saturating_add(step_delta)).min(goal));
            }
            AxisDirection::Down => {
                counter.set(current.saturating_sub(step_delta));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal() -> JoystickCalibration {
        JoystickCalibration::default()
    }

    // Full upward deflection on the default calibration
    const Y_FULL_UP: u16 = 295;
    const Y_FULL_DOWN: u16 = 4085;

    #[test]
    fn test_disabled_is_noop() {
        let mut tm = TestModeController::new();
        let mut counter = StepCounter::new();

        tm.update(Y_FULL_UP, &cal(), false, 1000, &mut counter);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_goal_setting_gates_update() {
        let mut tm = TestModeController::new();
        tm.toggle();
        let mut counter = StepCounter::new();

        tm.update(Y_FULL_UP, &cal(), true, 1000, &mut counter);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_full_up_deflection_adds_steps() {
        let mut tm = TestModeController::new();
        tm.toggle();
        let mut counter = StepCounter::new();

        tm.update(Y_FULL_UP, &cal(), false, 1000, &mut counter);
        // max change = 1000 * 15 / 1000 = 15; 100% of it
        assert_eq!(counter.get(), 15);
    }

    #[test]
    fn test_up_clamps_at_goal() {
        let mut tm = TestModeController::new();
        tm.toggle();
        let mut counter = StepCounter::new();
        counter.set(995);

        tm.update(Y_FULL_UP, &cal(), false, 1000, &mut counter);
        assert_eq!(counter.get(), 1000);
    }

    #[test]
    fn test_down_floors_at_zero() {
        let mut tm = TestModeController::new();
        tm.toggle();
        let mut counter = StepCounter::new();
        counter.set(5);

        tm.update(Y_FULL_DOWN, &cal(), false, 1000, &mut counter);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_dead_zone() {
        let mut tm = TestModeController::new();
        tm.toggle();
        let mut counter = StepCounter::new();
        counter.set(100);

        // ~20% deflection: inside the 30% dead zone
        let adc_y = 2265 + ((4085 - 2265) * 20 / 100) as u16;
        tm.update(adc_y, &cal(), false, 1000, &mut counter);
        assert_eq!(counter.get(), 100);
    }

    #[test]
    fn test_toggle_persists() {
        let mut tm = TestModeController::new();
        tm.toggle();
        assert!(tm.is_enabled());
        tm.toggle();
        assert!(!tm.is_enabled());
    }
}
