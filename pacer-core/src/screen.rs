//! Display screen navigation
//!
//! Cyclic three-screen selector driven by joystick X displacement,
//! with a cooldown so one flick changes exactly one screen.

use crate::config::{JoystickCalibration, NAV_COOLDOWN_TICKS, NAV_THRESHOLD_PERCENT};
use crate::joystick::{self, AxisDirection};

/// Display screens, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    #[default]
    Steps,
    GoalProgress,
    Distance,
}

impl Screen {
    pub fn next(self) -> Self {
        match self {
            Screen::Steps => Screen::GoalProgress,
            Screen::GoalProgress => Screen::Distance,
            Screen::Distance => Screen::Steps,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Steps => Screen::Distance,
            Screen::GoalProgress => Screen::Steps,
            Screen::Distance => Screen::GoalProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenNav {
    current: Screen,
    cooldown: u8,
}

impl ScreenNav {
    pub const fn new() -> Self {
        Self {
            current: Screen::Steps,
            cooldown: 0,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Process one navigation tick
    ///
    /// Ignored entirely while test mode or goal-setting is active. A
    /// nonzero cooldown consumes the tick without looking at the stick.
    pub fn update(
        &mut self,
        adc_x: u16,
        cal: &JoystickCalibration,
        test_mode_active: bool,
        in_goal_setting: bool,
    ) {
        if test_mode_active || in_goal_setting {
            return;
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return;
        }

        if joystick::x_percentage(cal, adc_x) < NAV_THRESHOLD_PERCENT {
            return;
        }

        match joystick::x_direction(cal, adc_x) {
            AxisDirection::Right => {
                self.current = self.current.next();
                self.cooldown = NAV_COOLDOWN_TICKS;
            }
            AxisDirection::Left => {
                self.current = self.current.prev();
                self.cooldown = NAV_COOLDOWN_TICKS;
            }
            _ => {}
        }
    }
}
