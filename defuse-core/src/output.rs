//! What one machine step asks of the outside world

use heapless::Vec;

use crate::config::Tone;
use crate::setup::{Field, Hms};
use crate::state::Mode;

/// Most tone commands a single step can issue
pub const MAX_TONES_PER_STEP: usize = 4;

/// How much of the screen a frame replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Redraw {
    /// Clear and draw everything
    Full,
    /// Only the parts that change while disarming (progress, time)
    Partial,
}

impl Redraw {
    /// Combine two requests; a full redraw covers a partial one
    pub fn merge(self, other: Redraw) -> Redraw {
        match (self, other) {
            (Redraw::Partial, Redraw::Partial) => Redraw::Partial,
            _ => Redraw::Full,
        }
    }
}

/// Render command describing everything a screen needs for one mode
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub mode: Mode,
    pub redraw: Redraw,
    /// Selected field (meaningful in Setup)
    pub cursor: Field,
    /// Setup value in Setup, remaining time otherwise
    pub time: Hms,
    /// Disarm hold progress, 0.0 to 1.0
    pub progress: f32,
    /// Whole seconds of hold still required, rounded up
    pub hold_remaining_s: u32,
    /// Flash phase while detonated
    pub flash_on: bool,
}

/// Tone request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneCommand {
    Play { frequency_hz: u16, duration_ms: u32 },
    Silence,
}

impl From<Tone> for ToneCommand {
    fn from(tone: Tone) -> Self {
        ToneCommand::Play {
            frequency_hz: tone.frequency_hz,
            duration_ms: tone.duration_ms,
        }
    }
}

/// Mode change performed by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

/// Result of one machine step: at most one frame plus ordered tones
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Output {
    pub frame: Option<Frame>,
    pub tones: Vec<ToneCommand, MAX_TONES_PER_STEP>,
    pub transition: Option<Transition>,
}

impl Output {
    /// Nothing to do
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tone command
    pub fn push_tone(&mut self, command: impl Into<ToneCommand>) {
        // Capacity covers the worst case of a single step
        let _ = self.tones.push(command.into());
    }

    /// Output has no side effects
    pub fn is_empty(&self) -> bool {
        self.frame.is_none() && self.tones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redraw_merge() {
        assert_eq!(Redraw::Partial.merge(Redraw::Partial), Redraw::Partial);
        assert_eq!(Redraw::Partial.merge(Redraw::Full), Redraw::Full);
        assert_eq!(Redraw::Full.merge(Redraw::Partial), Redraw::Full);
    }

    #[test]
    fn test_tone_conversion() {
        let command: ToneCommand = Tone::new(2000, 100).into();
        assert_eq!(
            command,
            ToneCommand::Play {
                frequency_hz: 2000,
                duration_ms: 100
            }
        );
    }

    #[test]
    fn test_push_tone_keeps_order() {
        let mut output = Output::new();
        assert!(output.is_empty());

        output.push_tone(ToneCommand::Silence);
        output.push_tone(Tone::new(2500, 10));

        assert_eq!(output.tones[0], ToneCommand::Silence);
        assert!(matches!(output.tones[1], ToneCommand::Play { .. }));
        assert!(!output.is_empty());
    }
}
