//! Text-mode presentation for the Defuse prop
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (OLED, LCD, log console)
//! - `Screen` buffer with per-row dirty tracking
//! - `renderer` turning core frames into screen content
//! - `ScreenSink`, the core `DisplaySink` that ties them together
//!
//! Partial frames from the core only touch the rows that change while
//! disarming, so a backend only receives those rows.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod renderer;
pub mod screen;
pub mod sink;

pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use sink::ScreenSink;
