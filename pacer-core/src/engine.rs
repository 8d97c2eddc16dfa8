//! Cooperative engine tying every component together
//!
//! The [`Engine`] is the single owning context for all shared state.
//! Each call to [`Engine::poll`] is one main-loop iteration: button
//! edges are accumulated unconditionally, then the periodic tasks run
//! in their fixed order, each at most once. Exactly one task body
//! executes at a time, which is what makes the lock-free shared
//! mutation safe; any caller distributing this across threads must keep
//! that single-writer-at-a-time discipline.
//!
//! Within one iteration a consumer scheduled before its producer reads
//! the previous period's value (the step detector sees the magnitude
//! cached by the last accelerometer run). This staleness is bounded by
//! one period and accepted.

use crate::config::{
    JoystickCalibration, DISPLAY_TOGGLE_THRESHOLD, STEP_WARMUP_MS, TASK_ACCELEROMETER_PERIOD_TICKS,
    TASK_BUTTON_PERIOD_TICKS, TASK_BUZZER_PERIOD_TICKS, TASK_DISPLAY_PERIOD_TICKS,
    TASK_JOYSTICK_PERIOD_TICKS, TASK_LED_PERIOD_TICKS, TASK_SERIAL_PERIOD_TICKS,
    TASK_STEP_PERIOD_TICKS, TASK_TEST_PERIOD_TICKS,
};
use crate::goal::{GoalChime, GoalTracker};
use crate::joystick::{self, AdcFrame, AxisDirection};
use crate::motion::{AccelPipeline, FilteredSample};
use crate::press::{ClickTracker, PressTracker};
use crate::scheduler::{TaskId, TaskTable};
use crate::screen::{Screen, ScreenNav};
use crate::steps::{StepCounter, StepDetector};
use crate::telemetry::TelemetryRecord;
use crate::test_mode::TestModeController;
use crate::traits::MotionSensor;

/// Task periods in [`TaskId`] order
const TASK_PERIODS: [u32; TaskId::COUNT] = [
    TASK_BUTTON_PERIOD_TICKS,
    TASK_DISPLAY_PERIOD_TICKS,
    TASK_JOYSTICK_PERIOD_TICKS,
    TASK_SERIAL_PERIOD_TICKS,
    TASK_STEP_PERIOD_TICKS,
    TASK_TEST_PERIOD_TICKS,
    TASK_BUZZER_PERIOD_TICKS,
    TASK_ACCELEROMETER_PERIOD_TICKS,
    TASK_LED_PERIOD_TICKS,
];

/// Pushed-edge button events for one iteration
///
/// The collaborator owns debouncing and edge detection; each flag means
/// "this button was pushed since the last frame".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ButtonEvents {
    fn merge(&mut self, other: ButtonEvents) {
        self.up |= other.up;
        self.down |= other.down;
        self.left |= other.left;
        self.right |= other.right;
    }
}

/// All external inputs for one main-loop iteration
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputFrame {
    /// Monotonic millisecond tick
    pub now_ms: u32,
    pub buttons: ButtonEvents,
    /// Latest ADC readings (updated continuously in the background)
    pub adc: AdcFrame,
    /// Joystick click GPIO level
    pub click_held: bool,
}

/// View model for the display collaborator
///
/// Text layout and rendering are not this crate's concern; the view
/// carries everything a renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayView {
    TestMode {
        steps: u16,
        goal: u16,
    },
    GoalSetting {
        steps: u16,
        goal: u16,
    },
    Steps {
        steps: u16,
        percent: u8,
        alt_units: bool,
    },
    GoalProgress {
        steps: u16,
        goal: u16,
        percent: u8,
        alt_units: bool,
    },
    Distance {
        metres: u16,
        yards: u16,
        alt_units: bool,
    },
}

/// Collaborator-facing outputs of one iteration
///
/// Fields are `Some`/true only when the producing task actually ran.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutput {
    pub display: Option<DisplayView>,
    pub telemetry: Option<TelemetryRecord>,
    /// Start edge for the goal-reached chime
    pub chime_start: bool,
    /// Progress percent for the LED collaborator
    pub led_progress: Option<u8>,
}

/// The owning context for all step counter state
#[derive(Debug, Clone)]
pub struct Engine {
    cal: JoystickCalibration,
    schedule: TaskTable<{ TaskId::COUNT }>,

    pipeline: AccelPipeline,
    detector: StepDetector,
    counter: StepCounter,
    goal: GoalTracker,
    test_mode: TestModeController,
    nav: ScreenNav,
    chime: GoalChime,
    down_tracker: PressTracker,
    clicks: ClickTracker,

    pending_buttons: ButtonEvents,
    serial_enabled: bool,
    /// Alternate display units (percent / yards) toggle
    alt_units: bool,
    unit_toggle_locked: bool,
    warmup_started_ms: Option<u32>,
    warmed_up: bool,
}

impl Engine {
    pub fn new(now_ms: u32) -> Self {
        Self::with_calibration(now_ms, JoystickCalibration::default())
    }

    pub fn with_calibration(now_ms: u32, cal: JoystickCalibration) -> Self {
        Self {
            cal,
            schedule: TaskTable::new(now_ms, TASK_PERIODS),
            pipeline: AccelPipeline::new(),
            detector: StepDetector::new(),
            counter: StepCounter::new(),
            goal: GoalTracker::new(),
            test_mode: TestModeController::new(),
            nav: ScreenNav::new(),
            chime: GoalChime::new(),
            down_tracker: PressTracker::new(),
            clicks: ClickTracker::new(),
            pending_buttons: ButtonEvents::default(),
            serial_enabled: false,
            alt_units: false,
            unit_toggle_locked: false,
            warmup_started_ms: None,
            warmed_up: false,
        }
    }

    /// Run one main-loop iteration
    pub fn poll<M: MotionSensor>(&mut self, frame: &InputFrame, sensor: &mut M) -> PollOutput {
        // Button sampling is unconditional so short presses between
        // button-task runs are not lost
        self.pending_buttons.merge(frame.buttons);

        let now = frame.now_ms;
        let mut out = PollOutput::default();

        if self.schedule.poll(TaskId::Button as usize, now) {
            self.button_task(now);
        }
        if self.schedule.poll(TaskId::Display as usize, now) {
            out.display = Some(self.display_view());
        }
        if self.schedule.poll(TaskId::Joystick as usize, now) {
            self.joystick_task(now, frame.click_held);
        }
        if self.schedule.poll(TaskId::Serial as usize, now) && self.serial_enabled {
            out.telemetry = Some(self.pipeline.latest().into());
        }
        if self.schedule.poll(TaskId::Step as usize, now) {
            self.step_task(now, frame.adc);
        }
        if self.schedule.poll(TaskId::TestMode as usize, now) {
            self.test_mode.update(
                frame.adc.y_axis,
                &self.cal,
                self.goal.in_goal_setting(),
                self.goal.goal(),
                &mut self.counter,
            );
        }
        if self.schedule.poll(TaskId::Buzzer as usize, now) {
            out.chime_start = self.chime.update(
                self.counter.get(),
                self.goal.goal(),
                self.goal.in_goal_setting(),
            );
        }
        if self.schedule.poll(TaskId::Accelerometer as usize, now) {
            // A failed read keeps the previous sample
            if let Ok(raw) = sensor.read_acceleration() {
                self.pipeline.execute(raw);
            }
        }
        if self.schedule.poll(TaskId::Led as usize, now) {
            out.led_progress = Some(self.goal.progress_percent(self.counter.get()));
        }

        out
    }

    /// UP adds steps, DOWN toggles the serial stream (and test mode on
    /// a double press); LEFT/RIGHT are reserved
    fn button_task(&mut self, now: u32) {
        let events = core::mem::take(&mut self.pending_buttons);

        if events.up && !self.goal.in_goal_setting() {
            let clamp = if self.test_mode.is_enabled() {
                Some(self.goal.goal())
            } else {
                None
            };
            self.counter.increment_by_button(clamp);
        }

        if events.down && !self.goal.in_goal_setting() {
            if self.down_tracker.observe(now) {
                self.test_mode.toggle();
            }
            self.serial_enabled = !self.serial_enabled;
        }
    }

    /// Long/short click detection for goal-setting entry/exit
    ///
    /// Only armed while the goal-progress screen is showing and test
    /// mode is off.
    fn joystick_task(&mut self, now: u32, click_held: bool) {
        if !self.test_mode.is_enabled() && self.nav.current() == Screen::GoalProgress {
            if let Some(edge) = self.clicks.update(now, click_held) {
                self.goal.push_press(edge);
            }
        }
    }

    fn step_task(&mut self, now: u32, adc: AdcFrame) {
        // Let the filters flush the startup baseline before detecting
        if !self.warmed_up {
            let started = *self.warmup_started_ms.get_or_insert(now);
            if now.wrapping_sub(started) < STEP_WARMUP_MS {
                return;
            }
            self.warmed_up = true;
        }

        let test_mode = self.test_mode.is_enabled();
        let in_goal_setting = self.goal.in_goal_setting();

        if !test_mode && !in_goal_setting {
            self.nav
                .update(adc.x_axis, &self.cal, test_mode, in_goal_setting);
            self.check_unit_toggle(adc.y_axis);
            self.goal.service(&mut self.counter);

            let magnitude = self.pipeline.latest().magnitude_squared;
            if self.detector.process(magnitude) {
                self.counter.increment(1, None);
            }
        }

        if self.goal.in_goal_setting() && !test_mode {
            let percent = joystick::potentiometer_percentage(&self.cal, adc.potentiometer);
            self.goal.update_from_potentiometer(percent);
            self.goal.service(&mut self.counter);
        }
    }

    /// A strong upward flick toggles between unit displays, once per
    /// excursion
    fn check_unit_toggle(&mut self, adc_y: u16) {
        let percent = joystick::y_percentage(&self.cal, adc_y);
        let direction = joystick::y_direction(&self.cal, adc_y);

        if percent >= DISPLAY_TOGGLE_THRESHOLD && direction == AxisDirection::Up {
            if !self.unit_toggle_locked {
                self.alt_units = !self.alt_units;
                self.unit_toggle_locked = true;
            }
        } else {
            self.unit_toggle_locked = false;
        }
    }

    fn display_view(&self) -> DisplayView {
        let steps = self.counter.get();
        let goal = self.goal.goal();

        if self.test_mode.is_enabled() {
            DisplayView::TestMode { steps, goal }
        } else if self.goal.in_goal_setting() {
            DisplayView::GoalSetting { steps, goal }
        } else {
            match self.nav.current() {
                Screen::Steps => DisplayView::Steps {
                    steps,
                    percent: self.goal.progress_percent(steps),
                    alt_units: self.alt_units,
                },
                Screen::GoalProgress => DisplayView::GoalProgress {
                    steps,
                    goal,
                    percent: self.goal.progress_percent(steps),
                    alt_units: self.alt_units,
                },
                Screen::Distance => DisplayView::Distance {
                    metres: self.counter.distance_metres(),
                    yards: self.counter.distance_yards(),
                    alt_units: self.alt_units,
                },
            }
        }
    }

    // Read-only state accessors for collaborators

    pub fn steps(&self) -> u16 {
        self.counter.get()
    }

    pub fn goal(&self) -> u16 {
        self.goal.goal()
    }

    pub fn progress_percent(&self) -> u8 {
        self.goal.progress_percent(self.counter.get())
    }

    pub fn current_screen(&self) -> Screen {
        self.nav.current()
    }

    pub fn test_mode_active(&self) -> bool {
        self.test_mode.is_enabled()
    }

    pub fn in_goal_setting(&self) -> bool {
        self.goal.in_goal_setting()
    }

    pub fn serial_enabled(&self) -> bool {
        self.serial_enabled
    }

    pub fn latest_sample(&self) -> FilteredSample {
        self.pipeline.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_GOAL, LOWER_THRESHOLD, UPPER_THRESHOLD};
    use crate::motion::RawAcceleration;
    use crate::traits::SensorUnavailable;

    /// Sensor returning a fixed triple
    struct FixedSensor(RawAcceleration);

    impl MotionSensor for FixedSensor {
        fn read_acceleration(&mut self) -> Result<RawAcceleration, SensorUnavailable> {
            Ok(self.0)
        }
    }

    /// Sensor that always fails
    struct DeadSensor;

    impl MotionSensor for DeadSensor {
        fn read_acceleration(&mut self) -> Result<RawAcceleration, SensorUnavailable> {
            Err(SensorUnavailable)
        }
    }

    fn resting_frame(now_ms: u32) -> InputFrame {
        InputFrame {
            now_ms,
            buttons: ButtonEvents::default(),
            adc: AdcFrame {
                potentiometer: 2000,
                y_axis: 2265,
                x_axis: 2185,
            },
            click_held: false,
        }
    }

    fn resting_sensor() -> FixedSensor {
        // All axes at the filter baseline: no orientation rule matches
        // and the squared magnitude sits inside the hysteresis band
        FixedSensor(RawAcceleration {
            x: 9310,
            y: 9310,
            z: 9310,
        })
    }

    #[test]
    fn test_iteration_zero_is_quiet() {
        let mut engine = Engine::new(0);
        let out = engine.poll(&resting_frame(0), &mut resting_sensor());

        assert!(out.display.is_none());
        assert!(out.telemetry.is_none());
        assert!(!out.chime_start);
        assert!(out.led_progress.is_none());
        assert_eq!(engine.steps(), 0);
    }

    #[test]
    fn test_up_button_adds_ten_steps() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        let mut frame = resting_frame(11);
        frame.buttons.up = true;
        engine.poll(&frame, &mut sensor);

        assert_eq!(engine.steps(), 10);
    }

    #[test]
    fn test_button_edge_kept_until_task_runs() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        // Edge arrives before the button task is due
        let mut frame = resting_frame(5);
        frame.buttons.up = true;
        engine.poll(&frame, &mut sensor);
        assert_eq!(engine.steps(), 0);

        // Consumed on the next due iteration
        engine.poll(&resting_frame(11), &mut sensor);
        assert_eq!(engine.steps(), 10);
    }

    #[test]
    fn test_down_press_toggles_serial() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        let mut frame = resting_frame(11);
        frame.buttons.down = true;
        engine.poll(&frame, &mut sensor);
        assert!(engine.serial_enabled());

        // Serial task emits a record once enabled
        let out = engine.poll(&resting_frame(101), &mut sensor);
        assert!(out.telemetry.is_some());
    }

    #[test]
    fn test_double_press_enables_test_mode() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        let mut frame = resting_frame(11);
        frame.buttons.down = true;
        engine.poll(&frame, &mut sensor);
        assert!(!engine.test_mode_active());

        let mut frame = resting_frame(22);
        frame.buttons.down = true;
        engine.poll(&frame, &mut sensor);

        assert!(engine.test_mode_active());
        // Serial toggled twice: back off
        assert!(!engine.serial_enabled());
    }

    #[test]
    fn test_step_detected_from_motion() {
        let mut engine = Engine::new(0);
        // Strong z reading selects the z orientation rule; the magnitude
        // climbs monotonically out of the band and stays above it
        let mut sensor = FixedSensor(RawAcceleration {
            x: 9310,
            y: 9310,
            z: 18000,
        });

        for now in 1..=1500 {
            engine.poll(&resting_frame(now), &mut sensor);
        }

        // One sustained excursion: exactly one step
        assert_eq!(engine.steps(), 1);
        assert!(engine.latest_sample().magnitude_squared > UPPER_THRESHOLD);
    }

    #[test]
    fn test_no_steps_while_resting() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        for now in 1..=2000 {
            engine.poll(&resting_frame(now), &mut sensor);
        }

        // Resting magnitude stays inside the hysteresis band
        let m = engine.latest_sample().magnitude_squared;
        assert!(m > LOWER_THRESHOLD && m < UPPER_THRESHOLD);
        assert_eq!(engine.steps(), 0);
    }

    #[test]
    fn test_dead_sensor_keeps_previous_sample() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();
        for now in 1..=200 {
            engine.poll(&resting_frame(now), &mut sensor);
        }
        let before = engine.latest_sample();

        let mut dead = DeadSensor;
        for now in 201..=400 {
            engine.poll(&resting_frame(now), &mut dead);
        }
        assert_eq!(engine.latest_sample(), before);
    }

    #[test]
    fn test_step_task_sees_previous_period_sample() {
        // Within one iteration the step task runs before the
        // accelerometer task; the sample it consumed predates the one
        // cached afterwards
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        // Jump straight to a tick where both tasks are due
        engine.poll(&resting_frame(51), &mut sensor);

        // The accelerometer did run this iteration...
        assert_ne!(engine.latest_sample(), FilteredSample::default());
        // ...but nothing the step task saw could have come from it
        assert_eq!(engine.steps(), 0);
    }

    #[test]
    fn test_goal_setting_flow_via_click() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        // Navigate to the goal-progress screen: full right flick once
        // the step task is past warmup
        let mut now = 1;
        while now <= 700 {
            engine.poll(&resting_frame(now), &mut sensor);
            now += 1;
        }
        let mut frame = resting_frame(now);
        frame.adc.x_axis = 190; // full right deflection
        engine.poll(&frame, &mut sensor);
        now += 1;
        while engine.current_screen() != Screen::GoalProgress && now < 1000 {
            let mut frame = resting_frame(now);
            frame.adc.x_axis = 190;
            engine.poll(&frame, &mut sensor);
            now += 1;
        }
        assert_eq!(engine.current_screen(), Screen::GoalProgress);

        // Hold the click past the long-press threshold
        let hold_start = now;
        while now < hold_start + 1200 {
            let mut frame = resting_frame(now);
            frame.click_held = true;
            engine.poll(&frame, &mut sensor);
            now += 1;
        }
        // Release and let the step task service the mode machine
        for _ in 0..200 {
            engine.poll(&resting_frame(now), &mut sensor);
            now += 1;
        }
        assert!(engine.in_goal_setting());

        // Drag the potentiometer to maximum: goal re-targets
        for _ in 0..200 {
            let mut frame = resting_frame(now);
            frame.adc.potentiometer = 4095;
            engine.poll(&frame, &mut sensor);
            now += 1;
        }
        assert_eq!(engine.goal(), crate::config::MAX_GOAL);

        // Short press cancels: goal restored
        for _ in 0..100 {
            let mut frame = resting_frame(now);
            frame.click_held = true;
            engine.poll(&frame, &mut sensor);
            now += 1;
        }
        for _ in 0..200 {
            engine.poll(&resting_frame(now), &mut sensor);
            now += 1;
        }
        assert!(!engine.in_goal_setting());
        assert_eq!(engine.goal(), DEFAULT_GOAL);
    }

    #[test]
    fn test_test_mode_drive_to_goal_fires_chime() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        // Enable test mode via double press
        let mut frame = resting_frame(11);
        frame.buttons.down = true;
        engine.poll(&frame, &mut sensor);
        let mut frame = resting_frame(22);
        frame.buttons.down = true;
        engine.poll(&frame, &mut sensor);
        assert!(engine.test_mode_active());

        // Hold the stick fully up until the goal is reached
        let mut chime_fires = 0;
        for now in 23..=6000 {
            let mut frame = resting_frame(now);
            frame.adc.y_axis = 295;
            let out = engine.poll(&frame, &mut sensor);
            if out.chime_start {
                chime_fires += 1;
            }
        }

        assert_eq!(engine.steps(), engine.goal());
        assert_eq!(chime_fires, 1);
    }

    #[test]
    fn test_display_view_follows_mode() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        let out = engine.poll(&resting_frame(101), &mut sensor);
        assert_eq!(
            out.display,
            Some(DisplayView::Steps {
                steps: 0,
                percent: 0,
                alt_units: false,
            })
        );

        // Enter test mode and check the view switches
        let mut frame = resting_frame(111);
        frame.buttons.down = true;
        engine.poll(&frame, &mut sensor);
        let mut frame = resting_frame(122);
        frame.buttons.down = true;
        engine.poll(&frame, &mut sensor);

        let out = engine.poll(&resting_frame(202), &mut sensor);
        assert_eq!(
            out.display,
            Some(DisplayView::TestMode {
                steps: 0,
                goal: DEFAULT_GOAL,
            })
        );
    }

    #[test]
    fn test_led_progress_reported() {
        let mut engine = Engine::new(0);
        let mut sensor = resting_sensor();

        let mut frame = resting_frame(11);
        frame.buttons.up = true;
        engine.poll(&frame, &mut sensor);

        let out = engine.poll(&resting_frame(101), &mut sensor);
        // 10 steps of 1000 = 1%
        assert_eq!(out.led_progress, Some(1));
    }
}
