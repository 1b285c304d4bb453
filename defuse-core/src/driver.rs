//! One tick of the main loop
//!
//! Reads the clock, polls the input source, advances the machine and
//! hands the result to the sinks. The firmware calls [`run_tick`] from its
//! ticker task; tests call it with fakes.

use crate::input::InputSnapshot;
use crate::output::{Output, ToneCommand};
use crate::state::Machine;
use crate::traits::{Clock, DisplaySink, InputSource, ToneSink};

/// Run a single machine step against the given capabilities
///
/// Returns the step's output after dispatch so the caller can log it.
pub fn run_tick<C, I, D, T>(
    machine: &mut Machine,
    clock: &C,
    input: &mut I,
    display: &mut D,
    tone: &mut T,
) -> Output
where
    C: Clock + ?Sized,
    I: InputSource + ?Sized,
    D: DisplaySink + ?Sized,
    T: ToneSink + ?Sized,
{
    let now = clock.now_ms();
    input.poll(now);
    let snapshot = InputSnapshot::sample(&*input, machine.config().timing.auto_repeat_delay_ms);

    let output = machine.step(now, &snapshot);
    dispatch(&output, display, tone);
    output
}

/// Send a step's frame and tones to the sinks, tones in order
pub fn dispatch<D, T>(output: &Output, display: &mut D, tone: &mut T)
where
    D: DisplaySink + ?Sized,
    T: ToneSink + ?Sized,
{
    if let Some(frame) = &output.frame {
        display.render(frame);
    }

    for command in &output.tones {
        match *command {
            ToneCommand::Play {
                frequency_hz,
                duration_ms,
            } => tone.tone(frequency_hz, duration_ms),
            ToneCommand::Silence => tone.silence(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropConfig;
    use crate::input::ButtonId;
    use crate::output::{Frame, Redraw};
    use crate::setup::Hms;
    use crate::state::Mode;
    use core::cell::Cell;

    struct FakeClock(Cell<u64>);

    impl FakeClock {
        fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    /// One button going down at `press_at` and up at `release_at`
    #[derive(Default)]
    struct ScriptedButton {
        target: Option<ButtonId>,
        press_at: u64,
        release_at: u64,
        now: Option<u64>,
        prev: Option<u64>,
        polls: usize,
    }

    impl ScriptedButton {
        fn hold(id: ButtonId, press_at: u64, release_at: u64) -> Self {
            Self {
                target: Some(id),
                press_at,
                release_at,
                ..Default::default()
            }
        }

        fn down(&self, at: Option<u64>) -> bool {
            at.map_or(false, |t| {
                self.target.is_some() && t >= self.press_at && t < self.release_at
            })
        }
    }

    impl InputSource for ScriptedButton {
        fn poll(&mut self, now_ms: u64) {
            self.prev = self.now;
            self.now = Some(now_ms);
            self.polls += 1;
        }

        fn was_pressed(&self, id: ButtonId) -> bool {
            self.target == Some(id) && self.down(self.now) && !self.down(self.prev)
        }

        fn is_held(&self, id: ButtonId) -> bool {
            self.target == Some(id) && self.down(self.now)
        }

        fn held_for(&self, id: ButtonId, ms: u32) -> bool {
            self.is_held(id)
                && self
                    .now
                    .map_or(false, |now| now - self.press_at >= ms as u64)
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Vec<Frame>,
    }

    impl DisplaySink for RecordingDisplay {
        fn render(&mut self, frame: &Frame) {
            self.frames.push(*frame);
        }
    }

    #[derive(Default)]
    struct RecordingTone {
        played: Vec<(u16, u32)>,
        silenced: usize,
    }

    impl ToneSink for RecordingTone {
        fn tone(&mut self, frequency_hz: u16, duration_ms: u32) {
            self.played.push((frequency_hz, duration_ms));
        }

        fn silence(&mut self) {
            self.silenced += 1;
        }
    }

    #[test]
    fn test_first_tick_renders_setup() {
        let mut machine = Machine::new(PropConfig::default());
        let clock = FakeClock(Cell::new(0));
        let mut input = ScriptedButton::default();
        let mut display = RecordingDisplay::default();
        let mut tone = RecordingTone::default();

        let out = run_tick(&mut machine, &clock, &mut input, &mut display, &mut tone);

        assert_eq!(input.polls, 1);
        assert_eq!(display.frames.len(), 1);
        assert_eq!(display.frames[0].mode, Mode::Setup);
        assert_eq!(display.frames[0].redraw, Redraw::Full);
        assert!(tone.played.is_empty());
        assert!(out.transition.is_none());
    }

    #[test]
    fn test_start_press_reaches_sinks() {
        let mut machine = Machine::new(PropConfig::default());
        assert!(machine.preset(Hms::new(0, 0, 30)));
        let clock = FakeClock(Cell::new(0));
        let mut input = ScriptedButton::hold(ButtonId::C, 100, 150);
        let mut display = RecordingDisplay::default();
        let mut tone = RecordingTone::default();

        run_tick(&mut machine, &clock, &mut input, &mut display, &mut tone);
        clock.advance(100);
        let out = run_tick(&mut machine, &clock, &mut input, &mut display, &mut tone);

        assert_eq!(machine.mode(), Mode::Countdown);
        assert!(out.transition.is_some());
        let last = display.frames.last().expect("countdown frame");
        assert_eq!(last.mode, Mode::Countdown);
        assert_eq!(last.time, Hms::new(0, 0, 30));
        // Click then the first ten-second beep
        assert_eq!(tone.played, [(2500, 10), (2000, 100)]);
    }

    #[test]
    fn test_full_disarm_through_driver() {
        let mut machine = Machine::new(PropConfig::default());
        machine.preset(Hms::new(0, 0, 30));
        let clock = FakeClock(Cell::new(0));
        let mut display = RecordingDisplay::default();
        let mut tone = RecordingTone::default();

        let mut start = ScriptedButton::hold(ButtonId::C, 0, 50);
        run_tick(&mut machine, &clock, &mut start, &mut display, &mut tone);
        assert_eq!(machine.mode(), Mode::Countdown);

        let mut input = ScriptedButton::hold(ButtonId::A, 1000, 20_000);
        let mut modes = Vec::new();
        while clock.now_ms() < 7000 {
            clock.advance(10);
            let out = run_tick(&mut machine, &clock, &mut input, &mut display, &mut tone);
            if let Some(t) = out.transition {
                modes.push(t.to);
            }
        }

        assert_eq!(modes, [Mode::Disarming, Mode::Disarmed]);
        let partials = display
            .frames
            .iter()
            .filter(|f| f.redraw == Redraw::Partial)
            .count();
        assert!(partials > 0);
    }

    #[test]
    fn test_dispatch_keeps_tone_order() {
        let mut output = Output::new();
        output.push_tone(ToneCommand::Silence);
        output.push_tone(ToneCommand::Play {
            frequency_hz: 2500,
            duration_ms: 10,
        });
        let mut display = RecordingDisplay::default();
        let mut tone = RecordingTone::default();

        dispatch(&output, &mut display, &mut tone);

        assert!(display.frames.is_empty());
        assert_eq!(tone.silenced, 1);
        assert_eq!(tone.played, [(2500, 10)]);
    }
}
