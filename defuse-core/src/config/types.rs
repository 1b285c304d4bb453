//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing thresholds, all in milliseconds unless the name says `_s`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// Edges are ignored for this long after a handled press
    pub debounce_ms: u32,
    /// Continuous hold needed to disarm
    pub hold_ms: u32,
    /// Adjust button must be held this long before auto-repeat starts
    pub auto_repeat_delay_ms: u32,
    /// Minimum gap between auto-repeat steps
    pub auto_repeat_interval_ms: u32,
    /// Wall-clock time per countdown decrement
    pub step_ms: u32,
    /// Minimum re-fire gap for the minute, ten-second and one-second bands
    pub beep_gap_ms: u32,
    /// Minimum re-fire gap for the final band
    pub fast_beep_gap_ms: u32,
    /// Flash toggle period while detonated
    pub flash_interval_ms: u32,
    /// Above this many seconds, beep on whole minutes
    pub minute_band_above_s: u32,
    /// From this many seconds up to the minute band, beep every ten seconds
    pub ten_band_from_s: u32,
    /// Below this many seconds, beep several times per second
    pub fast_band_below_s: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            hold_ms: 5000,
            auto_repeat_delay_ms: 500,
            auto_repeat_interval_ms: 100,
            step_ms: 1000,
            beep_gap_ms: 1000,
            fast_beep_gap_ms: 333,
            flash_interval_ms: 200,
            minute_band_above_s: 60,
            ten_band_from_s: 10,
            fast_band_below_s: 3,
        }
    }
}

/// A single tone request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct Tone {
    /// Pitch in Hz
    pub frequency_hz: u16,
    /// Length in milliseconds
    pub duration_ms: u32,
}

impl Tone {
    /// Create a tone
    pub const fn new(frequency_hz: u16, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Tones emitted by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ToneConfig {
    /// Short click on every handled press
    pub click: Tone,
    /// Countdown cadence beep
    pub beep: Tone,
    /// Long terminal alarm on detonation
    pub alarm: Tone,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            click: Tone::new(2500, 10),
            beep: Tone::new(2000, 100),
            alarm: Tone::new(1500, 10_000),
        }
    }
}

/// Which outcome wins when the hold completes on the same tick the
/// countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TieBreak {
    /// A completed hold disarms even if the countdown expired this tick
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "disarm"))]
    DisarmWins,
    /// Expiry detonates even if the hold completed this tick
    #[cfg_attr(feature = "serde", serde(rename = "detonate"))]
    DetonationWins,
}

/// Behavioral policies for the countdown/disarm overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PolicyConfig {
    /// Tie-break between disarm success and expiry on the same tick
    pub tie_break: TieBreak,
    /// Keep decrementing (and beeping) while a disarm hold is in progress.
    /// When false the countdown is frozen for the length of the hold.
    pub countdown_during_disarm: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::DisarmWins,
            countdown_during_disarm: true,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `hold_ms` is zero, disarm would succeed on the press itself
    ZeroHoldDuration,
    /// `step_ms` is zero
    ZeroStep,
    /// A beep gap is zero
    ZeroBeepGap,
    /// `flash_interval_ms` is zero
    ZeroFlashInterval,
    /// `auto_repeat_interval_ms` is zero
    ZeroRepeatInterval,
    /// Band limits are not `0 < fast < ten <= minute`
    BandOrder,
}

/// Complete prop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PropConfig {
    pub timing: TimingConfig,
    pub tones: ToneConfig,
    pub policy: PolicyConfig,
}

impl PropConfig {
    /// Check that the thresholds describe a usable machine
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;

        if t.hold_ms == 0 {
            return Err(ConfigError::ZeroHoldDuration);
        }
        if t.step_ms == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if t.beep_gap_ms == 0 || t.fast_beep_gap_ms == 0 {
            return Err(ConfigError::ZeroBeepGap);
        }
        if t.flash_interval_ms == 0 {
            return Err(ConfigError::ZeroFlashInterval);
        }
        if t.auto_repeat_interval_ms == 0 {
            return Err(ConfigError::ZeroRepeatInterval);
        }
        if t.fast_band_below_s == 0
            || t.fast_band_below_s >= t.ten_band_from_s
            || t.ten_band_from_s > t.minute_band_above_s
        {
            return Err(ConfigError::BandOrder);
        }

        Ok(())
    }
}
