//! Joystick and potentiometer ADC interpretation
//!
//! Converts raw 12-bit ADC readings into displacement percentages and
//! directions relative to the calibrated centre.

use crate::config::JoystickCalibration;

/// Direction of joystick displacement
///
/// Compared by value; `Rest` means the axis is inside the centre
/// deadband.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisDirection {
    Up,
    Down,
    Left,
    Right,
    Rest,
}

/// Raw ADC channel snapshot, in fixed slot order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcFrame {
    pub potentiometer: u16,
    pub y_axis: u16,
    pub x_axis: u16,
}

fn scale_percent(offset: u32, span: u32) -> u32 {
    if span == 0 {
        return 0;
    }
    offset * 100 / span
}

/// X-axis displacement as a percentage of full deflection
///
/// Small jitters (<15%) clamp to 0 and anything past half deflection
/// clamps to 100.
pub fn x_percentage(cal: &JoystickCalibration, adc_value: u16) -> u8 {
    let percentage = if adc_value > cal.x_centre {
        scale_percent(
            (adc_value - cal.x_centre) as u32,
            (cal.x_max - cal.x_centre) as u32,
        )
    } else {
        scale_percent(
            (cal.x_centre - adc_value) as u32,
            (cal.x_centre - cal.x_min) as u32,
        )
    };

    if percentage < 15 {
        0
    } else if percentage > 50 {
        100
    } else {
        percentage as u8
    }
}

/// Y-axis displacement as a percentage of full deflection
pub fn y_percentage(cal: &JoystickCalibration, adc_value: u16) -> u8 {
    let percentage = if adc_value > cal.y_centre {
        scale_percent(
            (adc_value - cal.y_centre) as u32,
            (cal.y_max - cal.y_centre) as u32,
        )
    } else {
        scale_percent(
            (cal.y_centre - adc_value) as u32,
            (cal.y_centre - cal.y_min) as u32,
        )
    };

    if percentage < 10 {
        0
    } else if percentage > 90 {
        100
    } else {
        percentage as u8
    }
}

/// Potentiometer position as a percentage of its travel
pub fn potentiometer_percentage(cal: &JoystickCalibration, adc_value: u16) -> u8 {
    if adc_value <= cal.pot_min {
        return 0;
    }
    if adc_value >= cal.pot_max {
        return 100;
    }
    scale_percent(
        (adc_value - cal.pot_min) as u32,
        (cal.pot_max - cal.pot_min) as u32,
    ) as u8
}

/// X-axis direction
///
/// The X channel is wired inverted on the board: low ADC values mean
/// the stick is pushed right.
pub fn x_direction(cal: &JoystickCalibration, adc_x: u16) -> AxisDirection {
    if adc_x < cal.x_centre.saturating_sub(cal.centre_deadband) {
        AxisDirection::Right
    } else if adc_x > cal.x_centre + cal.centre_deadband {
        AxisDirection::Left
    } else {
        AxisDirection::Rest
    }
}

/// Y-axis direction (low ADC values mean up)
pub fn y_direction(cal: &JoystickCalibration, adc_y: u16) -> AxisDirection {
    if adc_y < cal.y_centre.saturating_sub(cal.centre_deadband) {
        AxisDirection::Up
    } else if adc_y > cal.y_centre + cal.centre_deadband {
        AxisDirection::Down
    } else {
        AxisDirection::Rest
    }
}
