//! Beep cadence bands
//!
//! The remaining time selects a band; each band remembers when it last
//! fired and enforces its own minimum gap, so moving into a new band
//! never inherits the previous band's cooldown.

use crate::config::TimingConfig;

const MINUTE_CADENCE_S: u32 = 60;
const TEN_CADENCE_S: u32 = 10;

/// Cadence band selected by remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeepBand {
    /// Above the minute limit: every whole minute
    Minute,
    /// Ten-second limit up to the minute limit: every ten seconds
    TenSeconds,
    /// Below ten seconds: every second
    Seconds,
    /// Final seconds: several beeps per second
    Fast,
}

impl BeepBand {
    /// Band for the given remaining time, `None` once the countdown is at zero
    pub fn for_remaining(remaining_s: u32, timing: &TimingConfig) -> Option<Self> {
        if remaining_s == 0 {
            None
        } else if remaining_s > timing.minute_band_above_s {
            Some(BeepBand::Minute)
        } else if remaining_s >= timing.ten_band_from_s {
            Some(BeepBand::TenSeconds)
        } else if remaining_s >= timing.fast_band_below_s {
            Some(BeepBand::Seconds)
        } else {
            Some(BeepBand::Fast)
        }
    }

    /// Minimum time between two beeps of this band
    pub fn min_gap_ms(self, timing: &TimingConfig) -> u32 {
        match self {
            BeepBand::Fast => timing.fast_beep_gap_ms,
            _ => timing.beep_gap_ms,
        }
    }

    /// Whether the remaining time sits on this band's cadence boundary
    fn on_boundary(self, remaining_s: u32) -> bool {
        match self {
            BeepBand::Minute => remaining_s % MINUTE_CADENCE_S == 0,
            BeepBand::TenSeconds => remaining_s % TEN_CADENCE_S == 0,
            BeepBand::Seconds | BeepBand::Fast => true,
        }
    }

    const fn index(self) -> usize {
        match self {
            BeepBand::Minute => 0,
            BeepBand::TenSeconds => 1,
            BeepBand::Seconds => 2,
            BeepBand::Fast => 3,
        }
    }
}

/// Per-band "last fired" timestamps plus the terminal alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeepSchedule {
    last_fired_ms: [Option<u64>; 4],
    alarm_started_ms: Option<u64>,
}

impl BeepSchedule {
    /// Nothing fired yet, alarm silent
    pub const fn new() -> Self {
        Self {
            last_fired_ms: [None; 4],
            alarm_started_ms: None,
        }
    }

    /// Forget all history
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Return the band that should beep now, recording that it fired
    pub fn due(&mut self, remaining_s: u32, now_ms: u64, timing: &TimingConfig) -> Option<BeepBand> {
        let band = BeepBand::for_remaining(remaining_s, timing)?;

        if !band.on_boundary(remaining_s) {
            return None;
        }

        let slot = &mut self.last_fired_ms[band.index()];
        if let Some(last) = *slot {
            if now_ms.saturating_sub(last) < band.min_gap_ms(timing) as u64 {
                return None;
            }
        }

        *slot = Some(now_ms);
        Some(band)
    }

    /// When `band` last fired
    pub fn last_fired(&self, band: BeepBand) -> Option<u64> {
        self.last_fired_ms[band.index()]
    }

    /// Record the terminal alarm starting
    pub fn start_alarm(&mut self, now_ms: u64) {
        self.alarm_started_ms = Some(now_ms);
    }

    /// Terminal alarm is still sounding
    pub fn alarm_sounding(&self) -> bool {
        self.alarm_started_ms.is_some()
    }

    /// Returns true exactly once, when the alarm has run for `duration_ms`
    pub fn alarm_finished(&mut self, now_ms: u64, duration_ms: u32) -> bool {
        match self.alarm_started_ms {
            Some(start) if now_ms.saturating_sub(start) >= duration_ms as u64 => {
                self.alarm_started_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Stop tracking the alarm; returns whether it was sounding
    pub fn silence_alarm(&mut self) -> bool {
        self.alarm_started_ms.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timing() -> TimingConfig {
        TimingConfig::default()
    }

    #[test]
    fn test_band_selection() {
        let t = timing();
        assert_eq!(BeepBand::for_remaining(3600, &t), Some(BeepBand::Minute));
        assert_eq!(BeepBand::for_remaining(61, &t), Some(BeepBand::Minute));
        assert_eq!(BeepBand::for_remaining(60, &t), Some(BeepBand::TenSeconds));
        assert_eq!(BeepBand::for_remaining(10, &t), Some(BeepBand::TenSeconds));
        assert_eq!(BeepBand::for_remaining(9, &t), Some(BeepBand::Seconds));
        assert_eq!(BeepBand::for_remaining(3, &t), Some(BeepBand::Seconds));
        assert_eq!(BeepBand::for_remaining(2, &t), Some(BeepBand::Fast));
        assert_eq!(BeepBand::for_remaining(1, &t), Some(BeepBand::Fast));
        assert_eq!(BeepBand::for_remaining(0, &t), None);
    }

    #[test]
    fn test_minute_band_only_on_whole_minutes() {
        let t = timing();
        let mut schedule = BeepSchedule::new();
        assert_eq!(schedule.due(119, 0, &t), None);
        assert_eq!(schedule.due(120, 0, &t), Some(BeepBand::Minute));
        // Same second, same band: gated
        assert_eq!(schedule.due(120, 500, &t), None);
    }

    #[test]
    fn test_ten_band_only_on_multiples_of_ten() {
        let t = timing();
        let mut schedule = BeepSchedule::new();
        assert_eq!(schedule.due(45, 0, &t), None);
        assert_eq!(schedule.due(40, 0, &t), Some(BeepBand::TenSeconds));
        assert_eq!(schedule.due(30, 10_000, &t), Some(BeepBand::TenSeconds));
    }

    #[test]
    fn test_fast_band_three_per_second() {
        let t = timing();
        let mut schedule = BeepSchedule::new();
        let fired = (0..1000u64)
            .step_by(10)
            .filter(|now| schedule.due(2, *now, &t).is_some())
            .count();
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_bands_have_independent_cooldowns() {
        let t = timing();
        let mut schedule = BeepSchedule::new();
        assert_eq!(schedule.due(10, 0, &t), Some(BeepBand::TenSeconds));
        // Moving into the one-second band fires immediately
        assert_eq!(schedule.due(9, 10, &t), Some(BeepBand::Seconds));
        assert_eq!(schedule.last_fired(BeepBand::TenSeconds), Some(0));
        assert_eq!(schedule.last_fired(BeepBand::Seconds), Some(10));
    }

    #[test]
    fn test_reset_forgets_history() {
        let t = timing();
        let mut schedule = BeepSchedule::new();
        schedule.due(5, 100, &t);
        schedule.start_alarm(100);
        schedule.reset();
        assert_eq!(schedule.last_fired(BeepBand::Seconds), None);
        assert!(!schedule.alarm_sounding());
        assert_eq!(schedule.due(5, 100, &t), Some(BeepBand::Seconds));
    }

    #[test]
    fn test_alarm_finishes_once() {
        let mut schedule = BeepSchedule::new();
        schedule.start_alarm(1000);
        assert!(schedule.alarm_sounding());
        assert!(!schedule.alarm_finished(10_999, 10_000));
        assert!(schedule.alarm_finished(11_000, 10_000));
        assert!(!schedule.alarm_finished(12_000, 10_000));
        assert!(!schedule.silence_alarm());
    }

    #[test]
    fn test_silence_alarm() {
        let mut schedule = BeepSchedule::new();
        assert!(!schedule.silence_alarm());
        schedule.start_alarm(0);
        assert!(schedule.silence_alarm());
        assert!(!schedule.alarm_sounding());
    }

    proptest! {
        #[test]
        fn prop_never_fires_within_gap(
            remaining in 1u32..200,
            step in 1u64..50,
            ticks in 1usize..400,
        ) {
            let t = timing();
            let mut schedule = BeepSchedule::new();
            let mut last: Option<u64> = None;
            for i in 0..ticks {
                let now = i as u64 * step;
                if let Some(band) = schedule.due(remaining, now, &t) {
                    if let Some(prev) = last {
                        prop_assert!(now - prev >= band.min_gap_ms(&t) as u64);
                    }
                    last = Some(now);
                }
            }
        }
    }
}
