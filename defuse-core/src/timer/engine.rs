//! Countdown engine
//!
//! Decrements at most one second per [`TimerEngine::tick`]. When ticks
//! arrive late the missed time is dropped, not caught up: the step is
//! re-based to the tick that performed it, so sustained scheduling delay
//! makes the countdown run slower than wall-clock time.

use super::beep::{BeepBand, BeepSchedule};
use crate::config::TimingConfig;

/// Countdown arithmetic and beep scheduling
#[derive(Debug, Clone)]
pub struct TimerEngine {
    timing: TimingConfig,
    /// Seconds left in the current run
    remaining_s: u32,
    /// Length the current run started with
    initial_s: u32,
    /// Time of the last decrement (or of start)
    last_step_ms: u64,
    /// Counting is in progress
    running: bool,
    /// The 1 -> 0 edge happened and has not been consumed yet
    expiry_pending: bool,
    beeps: BeepSchedule,
}

impl TimerEngine {
    /// Create an idle engine
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            remaining_s: 0,
            initial_s: 0,
            last_step_ms: 0,
            running: false,
            expiry_pending: false,
            beeps: BeepSchedule::new(),
        }
    }

    /// Begin a run of `total_s` seconds
    ///
    /// A zero duration is rejected and leaves the engine untouched.
    pub fn start(&mut self, total_s: u32, now_ms: u64) -> bool {
        if total_s == 0 {
            return false;
        }

        self.remaining_s = total_s;
        self.initial_s = total_s;
        self.last_step_ms = now_ms;
        self.running = true;
        self.expiry_pending = false;
        self.beeps.reset();
        true
    }

    /// Advance the countdown; returns true if a second was taken off
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.running || self.remaining_s == 0 {
            return false;
        }

        if now_ms.saturating_sub(self.last_step_ms) < self.timing.step_ms as u64 {
            return false;
        }

        self.remaining_s -= 1;
        self.last_step_ms = now_ms;

        if self.remaining_s == 0 {
            self.running = false;
            self.expiry_pending = true;
        }
        true
    }

    /// Beep band due at `now_ms`, if any; a returned band counts as fired
    pub fn due_beep(&mut self, now_ms: u64) -> Option<BeepBand> {
        if !self.running {
            return None;
        }
        self.beeps.due(self.remaining_s, now_ms, &self.timing)
    }

    /// Consume the expiry edge
    ///
    /// True exactly once per run: on the first call after the tick that
    /// took the count from 1 to 0.
    pub fn expired(&mut self) -> bool {
        core::mem::take(&mut self.expiry_pending)
    }

    /// Stop counting without expiring
    pub fn stop(&mut self) {
        self.running = false;
        self.expiry_pending = false;
    }

    /// Start tracking the terminal alarm
    pub fn start_alarm(&mut self, now_ms: u64) {
        self.beeps.start_alarm(now_ms);
    }

    /// True once, when the alarm has played for `duration_ms`
    pub fn alarm_finished(&mut self, now_ms: u64, duration_ms: u32) -> bool {
        self.beeps.alarm_finished(now_ms, duration_ms)
    }

    /// Stop tracking the alarm; returns whether it was still sounding
    pub fn silence_alarm(&mut self) -> bool {
        self.beeps.silence_alarm()
    }

    /// Terminal alarm is sounding
    pub fn alarm_sounding(&self) -> bool {
        self.beeps.alarm_sounding()
    }

    /// Seconds left
    pub fn remaining_s(&self) -> u32 {
        self.remaining_s
    }

    /// Seconds the current run started with
    pub fn initial_s(&self) -> u32 {
        self.initial_s
    }

    /// Counting is in progress
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Beep history
    pub fn beeps(&self) -> &BeepSchedule {
        &self.beeps
    }
}
