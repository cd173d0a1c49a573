//! Countdown state machine for focus sessions.
//!
//! The host drives `tick()` once per second; nothing here sleeps or blocks.
//!
//! # Invariants
//! - `seconds_left <= minutes * 60`.
//! - Session length changes are ignored while running.
//! - Reaching zero stops the timer.

pub const DEFAULT_FOCUS_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is paused; nothing changed.
    Idle,
    Running { seconds_left: u32 },
    /// Countdown just reached zero and stopped.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    minutes: u32,
    seconds_left: u32,
    running: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES)
    }
}

impl FocusTimer {
    /// Creates a paused timer. `0` minutes coerces to `1`.
    pub fn new(minutes: u32) -> Self {
        let minutes = minutes.max(1);
        Self {
            minutes,
            seconds_left: full_length(minutes),
            running: false,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Changes session length and resets the countdown. Ignored while running.
    pub fn set_minutes(&mut self, minutes: u32) {
        if self.running {
            return;
        }
        self.minutes = minutes.max(1);
        self.seconds_left = full_length(self.minutes);
    }

    /// Starts or pauses. Starting a finished timer restarts the full length.
    pub fn toggle_running(&mut self) {
        if !self.running && self.seconds_left == 0 {
            self.seconds_left = full_length(self.minutes);
        }
        self.running = !self.running;
    }

    /// Stops and restores the full session length.
    pub fn reset(&mut self) {
        self.running = false;
        self.seconds_left = full_length(self.minutes);
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.seconds_left <= 1 {
            self.seconds_left = 0;
            self.running = false;
            return TickOutcome::Finished;
        }
        self.seconds_left -= 1;
        TickOutcome::Running {
            seconds_left: self.seconds_left,
        }
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.seconds_left / 60, self.seconds_left % 60)
    }

    /// Elapsed share of the session in `0..=100`.
    pub fn progress_percent(&self) -> f64 {
        let total = f64::from(full_length(self.minutes).max(1));
        let elapsed = total - f64::from(self.seconds_left);
        (elapsed / total * 100.0).clamp(0.0, 100.0)
    }
}

fn full_length(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}

#[cfg(test)]
mod tests {
    use super::{FocusTimer, TickOutcome};

    #[test]
    fn default_timer_is_thirty_minutes_paused() {
        let timer = FocusTimer::default();
        assert_eq!(timer.minutes(), 30);
        assert_eq!(timer.display(), "30:00");
        assert!(!timer.is_running());
        assert_eq!(timer.progress_percent(), 0.0);
    }

    #[test]
    fn tick_only_counts_down_while_running() {
        let mut timer = FocusTimer::new(1);
        assert_eq!(timer.tick(), TickOutcome::Idle);

        timer.toggle_running();
        assert_eq!(timer.tick(), TickOutcome::Running { seconds_left: 59 });
        assert_eq!(timer.display(), "00:59");

        timer.toggle_running();
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.seconds_left(), 59);
    }

    #[test]
    fn countdown_finishes_and_stops() {
        let mut timer = FocusTimer::new(1);
        timer.toggle_running();
        for _ in 0..59 {
            assert!(matches!(timer.tick(), TickOutcome::Running { .. }));
        }
        assert_eq!(timer.tick(), TickOutcome::Finished);
        assert!(!timer.is_running());
        assert_eq!(timer.display(), "00:00");
        assert_eq!(timer.progress_percent(), 100.0);

        timer.toggle_running();
        assert_eq!(timer.seconds_left(), 60);
    }

    #[test]
    fn set_minutes_is_ignored_while_running_and_resets_when_idle() {
        let mut timer = FocusTimer::new(25);
        timer.toggle_running();
        timer.tick();
        timer.set_minutes(50);
        assert_eq!(timer.minutes(), 25);

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.seconds_left(), 25 * 60);

        timer.set_minutes(0);
        assert_eq!(timer.minutes(), 1);
        assert_eq!(timer.display(), "01:00");
    }
}
