//! Goal progress LED bank
//!
//! Three discrete LEDs light at 50%, 75% and 100% progress; a fourth
//! PWM LED shows partial progress below 25% as a brightness ramp.

use embassy_stm32::gpio::Output;
use embassy_stm32::peripherals::TIM3;
use embassy_stm32::timer::simple_pwm::SimplePwm;

/// Desired LED outputs for a progress value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPattern {
    /// Partial-progress LED duty, 0-100
    pub partial_duty: u8,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl LedPattern {
    pub fn from_progress(progress: u8) -> Self {
        let mut pattern = Self {
            partial_duty: 0,
            right: false,
            down: false,
            left: false,
        };

        if progress == 0 {
            return pattern;
        }

        if progress < 25 {
            // Ramp 1-24% across the full brightness range
            pattern.partial_duty = ((progress as u16 * 100) / 25) as u8;
        } else {
            pattern.partial_duty = 100;
            pattern.right = progress >= 50;
            pattern.down = progress >= 75;
            pattern.left = progress >= 100;
        }

        pattern
    }
}

pub struct GoalLeds {
    right: Output<'static>,
    down: Output<'static>,
    left: Output<'static>,
    partial: SimplePwm<'static, TIM3>,
}

impl GoalLeds {
    pub fn new(
        right: Output<'static>,
        down: Output<'static>,
        left: Output<'static>,
        mut partial: SimplePwm<'static, TIM3>,
    ) -> Self {
        partial.ch1().enable();
        partial.ch1().set_duty_cycle_fully_off();
        Self {
            right,
            down,
            left,
            partial,
        }
    }

    pub fn apply(&mut self, pattern: LedPattern) {
        self.right.set_level(pattern.right.into());
        self.down.set_level(pattern.down.into());
        self.left.set_level(pattern.left.into());
        self.partial.ch1().set_duty_cycle_percent(pattern.partial_duty);
    }
}
