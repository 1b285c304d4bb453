//! Countdown timing
//!
//! [`TimerEngine`] owns the remaining-seconds count, the once-per-run
//! expiry edge, the beep cadence and the terminal alarm timer.

pub mod beep;
pub mod engine;

pub use beep::{BeepBand, BeepSchedule};
pub use engine::TimerEngine;
