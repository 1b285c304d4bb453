//! Piezo buzzer on a PWM channel
//!
//! A tone is a 50% duty square wave at the requested pitch. Durations are
//! enforced by [`Buzzer::service`], which the tick task calls every tick.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Duration, Instant};

use defuse_core::traits::ToneSink;

/// System clock feeding the PWM slice
const SYS_CLK_HZ: u32 = 125_000_000;

/// Integer clock divider; 125 MHz / 64 covers ~30 Hz to audio range
const DIVIDER: u8 = 64;

/// Buzzer driver
pub struct Buzzer {
    pwm: Pwm<'static>,
    config: PwmConfig,
    /// When the current tone ends
    until: Option<Instant>,
}

impl Buzzer {
    /// Take over a PWM channel, starting silent
    pub fn new(pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = DIVIDER.into();
        config.compare_a = 0;

        let mut buzzer = Self {
            pwm,
            config,
            until: None,
        };
        buzzer.pwm.set_config(&buzzer.config);
        buzzer
    }

    /// Stop the current tone once its duration has passed
    pub fn service(&mut self) {
        if let Some(until) = self.until {
            if Instant::now() >= until {
                self.silence();
            }
        }
    }

    /// PWM top for `frequency_hz` at the fixed divider
    fn top_for(frequency_hz: u16) -> u16 {
        let counter_hz = SYS_CLK_HZ / DIVIDER as u32;
        let ticks = counter_hz / (frequency_hz.max(1) as u32);
        ticks.saturating_sub(1).clamp(1, u16::MAX as u32) as u16
    }
}

impl ToneSink for Buzzer {
    fn tone(&mut self, frequency_hz: u16, duration_ms: u32) {
        debug!("Tone {}Hz for {}ms", frequency_hz, duration_ms);

        let top = Self::top_for(frequency_hz);
        self.config.top = top;
        self.config.compare_a = top / 2;
        self.pwm.set_config(&self.config);

        self.until = Some(Instant::now() + Duration::from_millis(duration_ms as u64));
    }

    fn silence(&mut self) {
        if self.until.is_some() {
            debug!("Tone off");
        }
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
        self.until = None;
    }
}
