//! Button press pattern detection
//!
//! [`PressTracker`] recognises double presses on any polled button;
//! [`ClickTracker`] turns the raw joystick click level into long/short
//! press edges by timing the hold.

use crate::config::{DOUBLE_PRESS_THRESHOLD_MS, HOLD_TIME_MS};
use crate::goal::PressEdge;

/// Double-press-within-window detector
///
/// One instance per tracked button.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressTracker {
    last_press_ms: u32,
    press_count: u8,
}

impl PressTracker {
    pub const fn new() -> Self {
        Self {
            last_press_ms: 0,
            press_count: 0,
        }
    }

    /// Record a press at `now_ms`; returns true on the second press
    /// inside the window
    ///
    /// The window comparison is strictly less-than: a gap of exactly
    /// the threshold does not count.
    pub fn observe(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_press_ms) < DOUBLE_PRESS_THRESHOLD_MS {
            self.press_count += 1;
            self.last_press_ms = now_ms;

            if self.press_count == 2 {
                self.press_count = 0;
                return true;
            }
        } else {
            self.press_count = 1;
            self.last_press_ms = now_ms;
        }

        false
    }
}

/// Joystick click hold timer
///
/// Produces a [`PressEdge::Long`] once the click has been held for the
/// hold threshold (at most once per hold), or a [`PressEdge::Short`]
/// on release before that.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickTracker {
    press_start_ms: u32,
    click_in_progress: bool,
    long_press_fired: bool,
}

impl ClickTracker {
    pub const fn new() -> Self {
        Self {
            press_start_ms: 0,
            click_in_progress: false,
            long_press_fired: false,
        }
    }

    /// Sample the click level; returns an edge when one resolves
    pub fn update(&mut self, now_ms: u32, held: bool) -> Option<PressEdge> {
        if held {
            if !self.click_in_progress {
                self.press_start_ms = now_ms;
                self.click_in_progress = true;
                self.long_press_fired = false;
                None
            } else if !self.long_press_fired
                && now_ms.wrapping_sub(self.press_start_ms) >= HOLD_TIME_MS
            {
                self.long_press_fired = true;
                Some(PressEdge::Long)
            } else {
                None
            }
        } else {
            let edge = if self.click_in_progress && !self.long_press_fired {
                Some(PressEdge::Short)
            } else {
                None
            };
            self.press_start_ms = 0;
            self.click_in_progress = false;
            self.long_press_fired = false;
            edge
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_press_inside_window() {
        let mut tracker = PressTracker::new();
        assert!(!tracker.observe(1000));
        assert!(tracker.observe(1000 + DOUBLE_PRESS_THRESHOLD_MS - 1));
    }

    #[test]
    fn test_gap_equal_to_threshold_does_not_fire() {
        let mut tracker = PressTracker::new();
        assert!(!tracker.observe(1000));
        assert!(!tracker.observe(1000 + DOUBLE_PRESS_THRESHOLD_MS));
        // But the second press restarts the window
        assert!(tracker.observe(1000 + DOUBLE_PRESS_THRESHOLD_MS + 1));
    }

    #[test]
    fn test_fire_resets_count() {
        let mut tracker = PressTracker::new();
        tracker.observe(1000);
        assert!(tracker.observe(1100));
        // A third quick press starts a fresh pair
        assert!(!tracker.observe(1200));
        assert!(tracker.observe(1300));
    }

    #[test]
    fn test_short_press() {
        let mut clicks = ClickTracker::new();
        assert_eq!(clicks.update(0, true), None);
        assert_eq!(clicks.update(HOLD_TIME_MS - 1, true), None);
        assert_eq!(clicks.update(HOLD_TIME_MS, false), Some(PressEdge::Short));
    }

    #[test]
    fn test_long_press_fires_once_per_hold() {
        let mut clicks = ClickTracker::new();
        assert_eq!(clicks.update(0, true), None);
        assert_eq!(clicks.update(HOLD_TIME_MS, true), Some(PressEdge::Long));
        // Still held: no repeat, and no short edge on release
        assert_eq!(clicks.update(HOLD_TIME_MS + 500, true), None);
        assert_eq!(clicks.update(HOLD_TIME_MS + 600, false), None);
    }

    #[test]
    fn test_release_without_press_is_quiet() {
        let mut clicks = ClickTracker::new();
        assert_eq!(clicks.update(100, false), None);
    }
}
