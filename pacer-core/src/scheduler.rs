//! Cooperative periodic task scheduling
//!
//! Each task owns a [`ScheduleEntry`] advanced by its fixed period on
//! every run. If the main loop stalls, a task runs on every following
//! iteration (one period of credit at a time) until it has caught up to
//! the current tick: burst catch-up, never skip, so the long-run rate
//! stays fixed.

/// One periodic task's schedule state
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleEntry {
    next_run_tick: u32,
    period_ticks: u32,
}

impl ScheduleEntry {
    /// First run is one full period after `now`: nothing fires in
    /// iteration zero.
    pub const fn new(now: u32, period_ticks: u32) -> Self {
        Self {
            next_run_tick: now + period_ticks,
            period_ticks,
        }
    }

    /// Check whether the task is due, consuming one period if so
    ///
    /// Due means `now` strictly exceeds the next-run tick. On success
    /// the deadline advances by the period from its previous value, not
    /// from `now`.
    pub fn poll(&mut self, now: u32) -> bool {
        if now > self.next_run_tick {
            self.next_run_tick += self.period_ticks;
            true
        } else {
            false
        }
    }
}

/// Identifiers for the periodic tasks, in execution order
///
/// The order is significant: within one iteration, later tasks may
/// consume state produced by earlier tasks only from the previous
/// period if their own schedule has not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    Button = 0,
    Display,
    Joystick,
    Serial,
    Step,
    TestMode,
    Buzzer,
    Accelerometer,
    Led,
}

impl TaskId {
    pub const COUNT: usize = 9;
}

/// Fixed table of schedule entries, one per task
#[derive(Debug, Clone)]
pub struct TaskTable<const N: usize> {
    entries: [ScheduleEntry; N],
}

impl<const N: usize> TaskTable<N> {
    pub fn new(now: u32, periods: [u32; N]) -> Self {
        Self {
            entries: periods.map(|p| ScheduleEntry::new(now, p)),
        }
    }

    pub fn poll(&mut self, task: usize, now: u32) -> bool {
        self.entries[task].poll(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_run_before_first_period() {
        let mut entry = ScheduleEntry::new(0, 100);
        assert!(!entry.poll(0));
        assert!(!entry.poll(50));
        assert!(!entry.poll(100)); // strict comparison
        assert!(entry.poll(101));
    }

    #[test]
    fn test_fixed_rate_advance() {
        let mut entry = ScheduleEntry::new(0, 100);
        assert!(entry.poll(101));
        // Deadline moved to 200, not 201 + 100
        assert!(!entry.poll(150));
        assert!(entry.poll(201));
    }

    #[test]
    fn test_stall_catch_up_burst() {
        let mut entry = ScheduleEntry::new(0, 100);

        // Stall: jump well past three periods
        let now = 350;
        let mut runs = 0;
        // Simulated main-loop iterations at the same tick
        for _ in 0..10 {
            if entry.poll(now) {
                runs += 1;
            }
        }
        // Deadlines 100, 200, 300 were all due; 400 is not
        assert_eq!(runs, 3);

        // The run count never falls below whole periods elapsed
        assert!(entry.poll(401));
    }

    #[test]
    fn test_once_per_iteration_at_most() {
        let mut entry = ScheduleEntry::new(0, 100);
        // A single poll consumes a single period even when far behind
        assert!(entry.poll(1000));
        assert!(entry.poll(1000));
        // Caller polls once per iteration, so runs are spread across
        // iterations rather than looped within one
    }

    #[test]
    fn test_table_indexing() {
        let mut table: TaskTable<2> = TaskTable::new(0, [10, 20]);
        assert!(table.poll(0, 11));
        assert!(!table.poll(1, 11));
        assert!(table.poll(1, 21));
        assert_eq!(TaskId::Button as usize, 0);
        assert_eq!(TaskId::Led as usize, TaskId::COUNT - 1);
    }
}
