//! Defuse hardware input layer
//!
//! Turns raw `embedded-hal` digital input pins into the debounced
//! per-button view the core state machine consumes.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  defuse-core (InputSource trait)     │
//! └──────────────────────────────────────┘
//!                    ▲
//!                    │
//! ┌──────────────────────────────────────┐
//! │  defuse-hal: ButtonBank              │
//! │    └── 3 x DebouncedButton           │
//! └──────────────────────────────────────┘
//!                    ▲
//!                    │
//! ┌──────────────────────────────────────┐
//! │  embedded_hal::digital::InputPin     │
//! │  (embassy-rp Input, mocks in tests)  │
//! └──────────────────────────────────────┘
//! ```
//!
//! A pin that fails to read is treated as unchanged for that poll and the
//! failure is counted.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bank;
pub mod button;

pub use bank::ButtonBank;
pub use button::{ButtonConfig, DebouncedButton};
