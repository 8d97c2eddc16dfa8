//! Step goal tracking and goal-setting mode
//!
//! The goal tracker owns the NORMAL/GOAL_SETTING mode machine. While in
//! goal-setting mode the potentiometer continuously re-targets the goal;
//! on exit the `step_count <= goal` invariant is restored by clamping.

use crate::config::{DEFAULT_GOAL, MAX_GOAL, MIN_GOAL};
use crate::steps::StepCounter;

/// A consumed-once press edge from the joystick click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEdge {
    /// Released before the hold threshold
    Short,
    /// Held past the hold threshold
    Long,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GoalTracker {
    goal: u16,
    /// Snapshot taken on entry, restored on cancel
    previous_goal: u16,
    in_goal_setting: bool,
    /// Pending press edge, taken exactly once by `service`
    pending_press: Option<PressEdge>,
}

impl Default for GoalTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalTracker {
    pub const fn new() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            previous_goal: DEFAULT_GOAL,
            in_goal_setting: false,
            pending_press: None,
        }
    }

    pub fn goal(&self) -> u16 {
        self.goal
    }

    pub fn in_goal_setting(&self) -> bool {
        self.in_goal_setting
    }

    /// Record a press edge for the next `service` call
    ///
    /// A later edge overwrites an unconsumed earlier one.
    pub fn push_press(&mut self, edge: PressEdge) {
        self.pending_press = Some(edge);
    }

    /// Re-target the goal from the potentiometer position
    ///
    /// Monotonic in `percent`; the result never drops below the minimum
    /// goal.
    pub fn update_from_potentiometer(&mut self, percent: u8) {
        let new_goal = (percent as u32 * MAX_GOAL as u32 / 100) as u16;
        self.goal = new_goal.max(MIN_GOAL);
    }

    pub fn enter_goal_setting(&mut self) {
        self.previous_goal = self.goal;
        self.in_goal_setting = true;
    }

    /// Leave goal-setting mode
    ///
    /// Cancelling restores the goal snapshotted on entry. Either way,
    /// a step count above the (possibly new) goal is clamped down to it.
    pub fn exit_goal_setting(&mut self, commit: bool, counter: &mut StepCounter) {
        if !commit {
            self.goal = self.previous_goal;
        }
        self.in_goal_setting = false;

        if counter.get() > self.goal {
            counter.set(self.goal);
        }
    }

    /// Drive the mode machine from the pending press edge, if any
    ///
    /// While in goal-setting mode a long press commits and a short press
    /// cancels; outside it, a long press enters. The edge is consumed
    /// regardless of which branch runs.
    pub fn service(&mut self, counter: &mut StepCounter) {
        match self.pending_press.take() {
            Some(PressEdge::Long) if self.in_goal_setting => {
                self.exit_goal_setting(true, counter);
            }
            Some(PressEdge::Short) if self.in_goal_setting => {
                self.exit_goal_setting(false, counter);
            }
            Some(PressEdge::Long) => {
                self.enter_goal_setting();
            }
            _ => {}
        }
    }

    /// Goal progress as a truncated percentage, capped at 100
    pub fn progress_percent(&self, steps: u16) -> u8 {
        if self.goal == 0 {
            return 0;
        }
        if steps >= self.goal {
            return 100;
        }
        (steps as u32 * 100 / self.goal as u32) as u8
    }
}

/// One-shot goal-reached latch driving the celebration chime
///
/// Reports a single start edge when the count reaches the goal outside
/// goal-setting mode, and re-arms once the count drops back below it
/// (goal raised, or steps clamped down).
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GoalChime {
    tune_played: bool,
}

impl GoalChime {
    pub const fn new() -> Self {
        Self { tune_played: false }
    }

    pub fn update(&mut self, steps: u16, goal: u16, in_goal_setting: bool) -> bool {
        if steps >= goal && !self.tune_played && !in_goal_setting {
            self.tune_played = true;
            return true;
        }
        if steps < goal {
            self.tune_played = false;
        }
        false
    }
}
