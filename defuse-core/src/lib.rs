//! Board-agnostic core logic for the Defuse countdown prop
//!
//! This crate contains everything that decides *what* the prop does,
//! independent of the buttons, speaker and screen it runs on:
//!
//! - Mode state machine (Setup, Countdown, Disarming, Disarmed, Detonated)
//! - Timer engine (countdown arithmetic, beep cadence, terminal alarm)
//! - Disarm challenge (continuous-hold tracking)
//! - Input snapshots, debounce guard and auto-repeat
//! - Capability traits for clock, input, display and tone output
//! - Configuration types and a small TOML-subset parser
//!
//! One call to [`driver::run_tick`] samples the capabilities, advances the
//! [`state::Machine`] by exactly one step and dispatches its output.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod disarm;
pub mod driver;
pub mod input;
pub mod output;
pub mod setup;
pub mod state;
pub mod timer;
pub mod traits;
