//! Mode state machine
//!
//! [`Machine`] owns every piece of mutable prop state. Each call to
//! [`Machine::step`] consumes one input snapshot and one clock reading and
//! returns the render and tone requests for that tick. All transitions
//! are total: a step never fails.

use super::mode::Mode;
use crate::config::{PropConfig, TieBreak};
use crate::disarm::DisarmChallenge;
use crate::input::{AutoRepeat, ButtonId, EdgeGuard, HoldLatch, InputSnapshot};
use crate::output::{Frame, Output, Redraw, ToneCommand, Transition};
use crate::setup::{DurationSetting, Hms};
use crate::timer::TimerEngine;

/// Button that moves the Setup cursor
const CYCLE: ButtonId = ButtonId::A;
/// Button that changes the selected field
const ADJUST: ButtonId = ButtonId::B;
/// Button that starts the countdown
const START: ButtonId = ButtonId::C;

/// Flash phase of the detonated screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Flash {
    on: bool,
    last_toggle_ms: u64,
}

/// Countdown-and-disarm controller
#[derive(Debug, Clone)]
pub struct Machine {
    config: PropConfig,
    mode: Mode,
    setting: DurationSetting,
    /// Duration captured when the last countdown started
    initial: Hms,
    timer: TimerEngine,
    challenge: DisarmChallenge,
    guard: EdgeGuard,
    /// Buttons that cannot start a disarm hold until released
    latch: HoldLatch,
    repeat: AutoRepeat,
    flash: Flash,
    /// Redraw owed from outside a step (power-on, preset)
    pending_redraw: Option<Redraw>,
}

impl Machine {
    /// Power-on state: Setup at 00:00:00, first step draws the full screen
    pub fn new(config: PropConfig) -> Self {
        Self {
            timer: TimerEngine::new(config.timing),
            challenge: DisarmChallenge::new(config.timing.hold_ms),
            config,
            mode: Mode::Setup,
            setting: DurationSetting::default(),
            initial: Hms::default(),
            guard: EdgeGuard::new(),
            latch: HoldLatch::new(),
            repeat: AutoRepeat::new(),
            flash: Flash::default(),
            pending_redraw: Some(Redraw::Full),
        }
    }

    /// Replace the Setup value; ignored outside Setup
    pub fn preset(&mut self, value: Hms) -> bool {
        if self.mode != Mode::Setup {
            return false;
        }
        self.setting = DurationSetting::new(value);
        self.pending_redraw = Some(Redraw::Full);
        true
    }

    pub fn config(&self) -> &PropConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Value and cursor being edited in Setup
    pub fn setting(&self) -> &DurationSetting {
        &self.setting
    }

    /// Duration the last countdown started with
    pub fn initial(&self) -> Hms {
        self.initial
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn challenge(&self) -> &DisarmChallenge {
        &self.challenge
    }

    /// Detonated screen is in its lit phase
    pub fn flash_on(&self) -> bool {
        self.flash.on
    }

    /// Render command for the current state
    pub fn frame(&self, now_ms: u64, redraw: Redraw) -> Frame {
        let time = match self.mode {
            Mode::Setup => self.setting.value(),
            _ => Hms::from_total_seconds(self.timer.remaining_s()),
        };
        Frame {
            mode: self.mode,
            redraw,
            cursor: self.setting.cursor(),
            time,
            progress: self.challenge.progress(now_ms),
            hold_remaining_s: self.challenge.remaining_s(now_ms),
            flash_on: self.flash.on,
        }
    }

    /// Advance by one tick
    pub fn step(&mut self, now_ms: u64, input: &InputSnapshot) -> Output {
        let mut out = Output::new();
        let mut redraw = self.pending_redraw.take();
        let from = self.mode;

        match self.mode {
            Mode::Setup => self.step_setup(now_ms, input, &mut out, &mut redraw),
            Mode::Countdown | Mode::Disarming => {
                self.step_armed(now_ms, input, &mut out, &mut redraw)
            }
            Mode::Disarmed => self.step_disarmed(now_ms, input, &mut out, &mut redraw),
            Mode::Detonated => self.step_detonated(now_ms, input, &mut out, &mut redraw),
        }

        if self.mode != from {
            debug_assert!(from.can_transition_to(self.mode));
            out.transition = Some(Transition {
                from,
                to: self.mode,
            });
            request(&mut redraw, Redraw::Full);
        }

        out.frame = redraw.map(|r| self.frame(now_ms, r));
        out
    }

    fn step_setup(
        &mut self,
        now_ms: u64,
        input: &InputSnapshot,
        out: &mut Output,
        redraw: &mut Option<Redraw>,
    ) {
        let timing = self.config.timing;

        // Auto-repeat is rate limited by its own timestamp, not the guard
        if self
            .repeat
            .fire(now_ms, timing.auto_repeat_interval_ms, input.repeat_ready(ADJUST))
        {
            self.setting.decrement();
            request(redraw, Redraw::Full);
        }

        if !self.guard.is_open(now_ms) {
            return;
        }
        let Some(id) = input.first_pressed() else {
            return;
        };

        out.push_tone(self.config.tones.click);
        self.guard.arm(now_ms, timing.debounce_ms);

        match id {
            CYCLE => {
                self.setting.cycle_field();
                request(redraw, Redraw::Full);
            }
            ADJUST => {
                self.setting.increment();
                request(redraw, Redraw::Full);
            }
            START => {
                let total = self.setting.total_seconds();
                if self.timer.start(total, now_ms) {
                    self.initial = self.setting.value();
                    self.challenge.cancel();
                    self.latch = HoldLatch::new();
                    self.latch.latch_held(input);
                    self.mode = Mode::Countdown;
                    if self.timer.due_beep(now_ms).is_some() {
                        out.push_tone(self.config.tones.beep);
                    }
                }
            }
        }
    }

    fn step_armed(
        &mut self,
        now_ms: u64,
        input: &InputSnapshot,
        out: &mut Output,
        redraw: &mut Option<Redraw>,
    ) {
        let mut hold_complete = false;
        self.latch.update(input);

        match self.mode {
            // A press inside the guard window is picked up once it opens
            Mode::Countdown => {
                if self.guard.is_open(now_ms) {
                    if let Some(id) = self.latch.sole_free_hold(input) {
                        self.challenge.begin(id, now_ms);
                        out.push_tone(self.config.tones.click);
                        self.mode = Mode::Disarming;
                    }
                }
            }
            Mode::Disarming => match self.challenge.button() {
                Some(id) if input.held(id) && !input.any_held_except(id) => {
                    hold_complete = self.challenge.succeeded(now_ms);
                }
                held => {
                    // Both buttons of a broken two-button hold must be let go
                    if held.map_or(false, |id| input.held(id)) {
                        self.latch.latch_held(input);
                    }
                    self.challenge.cancel();
                    self.mode = Mode::Countdown;
                }
            },
            _ => {}
        }

        let counting = self.mode == Mode::Countdown
            || self.config.policy.countdown_during_disarm;
        let mut expired = false;
        if counting {
            if self.timer.tick(now_ms) {
                // The disarming screen updates its time row in place
                let r = match self.mode {
                    Mode::Disarming => Redraw::Partial,
                    _ => Redraw::Full,
                };
                request(redraw, r);
            }
            if self.timer.due_beep(now_ms).is_some() {
                out.push_tone(self.config.tones.beep);
            }
            expired = self.timer.expired();
        }

        let detonate = match (hold_complete, expired) {
            (true, true) => self.config.policy.tie_break == TieBreak::DetonationWins,
            (_, expired) => expired,
        };

        if detonate {
            self.detonate(now_ms, out);
        } else if hold_complete {
            self.challenge.cancel();
            self.timer.stop();
            self.mode = Mode::Disarmed;
        } else if self.mode == Mode::Disarming {
            let r = if self.challenge.take_full_redraw() {
                Redraw::Full
            } else {
                Redraw::Partial
            };
            request(redraw, r);
        }
    }

    fn detonate(&mut self, now_ms: u64, out: &mut Output) {
        self.challenge.cancel();
        out.push_tone(self.config.tones.alarm);
        self.timer.start_alarm(now_ms);
        self.flash = Flash {
            on: true,
            last_toggle_ms: now_ms,
        };
        self.mode = Mode::Detonated;
    }

    fn step_disarmed(
        &mut self,
        now_ms: u64,
        input: &InputSnapshot,
        out: &mut Output,
        _redraw: &mut Option<Redraw>,
    ) {
        if self.guard.is_open(now_ms) && input.any_pressed() {
            self.return_to_setup(now_ms, out);
        }
    }

    fn step_detonated(
        &mut self,
        now_ms: u64,
        input: &InputSnapshot,
        out: &mut Output,
        redraw: &mut Option<Redraw>,
    ) {
        let alarm_ms = self.config.tones.alarm.duration_ms;
        if self.timer.alarm_finished(now_ms, alarm_ms) {
            out.push_tone(ToneCommand::Silence);
        }

        if self.guard.is_open(now_ms) && input.any_pressed() {
            if self.timer.silence_alarm() {
                out.push_tone(ToneCommand::Silence);
            }
            self.return_to_setup(now_ms, out);
            return;
        }

        let interval = self.config.timing.flash_interval_ms as u64;
        if now_ms.saturating_sub(self.flash.last_toggle_ms) >= interval {
            self.flash.on = !self.flash.on;
            self.flash.last_toggle_ms = now_ms;
            request(redraw, Redraw::Full);
        }
    }

    fn return_to_setup(&mut self, now_ms: u64, out: &mut Output) {
        out.push_tone(self.config.tones.click);
        self.timer.stop();
        self.challenge.cancel();
        self.setting = DurationSetting::new(self.initial);
        self.flash = Flash::default();
        self.guard.arm(now_ms, self.config.timing.debounce_ms);
        self.mode = Mode::Setup;
    }
}

fn request(slot: &mut Option<Redraw>, redraw: Redraw) {
    *slot = Some(match *slot {
        Some(existing) => existing.merge(redraw),
        None => redraw,
    });
}
