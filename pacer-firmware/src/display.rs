//! Display rendering
//!
//! Turns a [`DisplayView`] into the text frame sent to the serial
//! display. Each frame starts with an ANSI clear so the newest view
//! replaces the previous one.

use core::fmt::Write;

use heapless::String;

use pacer_core::engine::DisplayView;

/// Rendered frame capacity
pub const FRAME_CAPACITY: usize = 128;

const CLEAR: &str = "\x1b[2J\x1b[H";

/// Render one view into a display frame
pub fn render(view: &DisplayView) -> String<FRAME_CAPACITY> {
    let mut frame = String::new();
    // Worst-case frame is under the capacity; write cannot fail
    let _ = frame.push_str(CLEAR);

    match *view {
        DisplayView::TestMode { steps, goal } => {
            let _ = write!(
                frame,
                "=== TEST MODE ===\r\nSteps RN: {}\r\nGoal:  {}\r\nUse joystick to test\r\n",
                steps, goal
            );
        }
        DisplayView::GoalSetting { steps, goal } => {
            let _ = write!(frame, "Set Step Goal:\r\n{}/{}\r\n", steps, goal);
        }
        DisplayView::Steps {
            steps,
            percent,
            alt_units,
        } => {
            let _ = frame.push_str("Steps:\r\n");
            if alt_units {
                let _ = write!(frame, "{}%\r\n", percent);
            } else {
                let _ = write!(frame, "{} steps\r\n", steps);
            }
        }
        DisplayView::GoalProgress {
            steps,
            goal,
            percent,
            alt_units,
        } => {
            let _ = frame.push_str("Goal Progress:\r\n");
            if alt_units {
                let _ = write!(frame, "{}%\r\n", percent);
            } else {
                let _ = write!(frame, "{}/{}\r\nSteps\r\n", steps, goal);
            }
        }
        DisplayView::Distance {
            metres,
            yards,
            alt_units,
        } => {
            let _ = frame.push_str("Distance:\r\n");
            if alt_units {
                let _ = write!(frame, "{} yd\r\n", yards);
            } else {
                let _ = write!(frame, "{}.{:03} km\r\n", metres / 1000, metres % 1000);
            }
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_km_formatting() {
        let frame = render(&DisplayView::Distance {
            metres: 904,
            yards: 989,
            alt_units: false,
        });
        assert!(frame.ends_with("Distance:\r\n0.904 km\r\n"));

        let frame = render(&DisplayView::Distance {
            metres: 1350,
            yards: 1476,
            alt_units: false,
        });
        assert!(frame.ends_with("1.350 km\r\n"));
    }

    #[test]
    fn test_alt_units_switch() {
        let frame = render(&DisplayView::Steps {
            steps: 420,
            percent: 42,
            alt_units: true,
        });
        assert!(frame.ends_with("Steps:\r\n42%\r\n"));

        let frame = render(&DisplayView::Distance {
            metres: 904,
            yards: 989,
            alt_units: true,
        });
        assert!(frame.ends_with("989 yd\r\n"));
    }

    #[test]
    fn test_goal_progress_caption_only_in_raw_mode() {
        let frame = render(&DisplayView::GoalProgress {
            steps: 500,
            goal: 1000,
            percent: 50,
            alt_units: false,
        });
        assert!(frame.contains("500/1000"));
        assert!(frame.contains("Steps"));

        let frame = render(&DisplayView::GoalProgress {
            steps: 500,
            goal: 1000,
            percent: 50,
            alt_units: true,
        });
        assert!(frame.contains("50%"));
    }
}
