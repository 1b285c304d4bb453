//! Disarm challenge
//!
//! Tracks the continuous hold that disarms the prop. An attempt records
//! which button started it and when; the button is compared by identity
//! for the life of the attempt. Any break requires a fresh
//! [`DisarmChallenge::begin`].

use crate::input::ButtonId;

/// One in-progress hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisarmAttempt {
    /// Button whose hold is being timed
    pub button: ButtonId,
    /// When the hold began
    pub started_ms: u64,
    /// The first frame of this attempt still needs a full redraw
    full_redraw_pending: bool,
}

/// Hold tracking for the disarm gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisarmChallenge {
    hold_ms: u32,
    attempt: Option<DisarmAttempt>,
}

impl DisarmChallenge {
    /// Challenge requiring a hold of `hold_ms`
    pub const fn new(hold_ms: u32) -> Self {
        Self {
            hold_ms,
            attempt: None,
        }
    }

    /// Start timing a hold of `button`, replacing any previous attempt
    pub fn begin(&mut self, button: ButtonId, now_ms: u64) {
        self.attempt = Some(DisarmAttempt {
            button,
            started_ms: now_ms,
            full_redraw_pending: true,
        });
    }

    /// Discard the current attempt
    pub fn cancel(&mut self) {
        self.attempt = None;
    }

    /// The current attempt, if any
    pub fn attempt(&self) -> Option<&DisarmAttempt> {
        self.attempt.as_ref()
    }

    /// Button being held for the current attempt
    pub fn button(&self) -> Option<ButtonId> {
        self.attempt.map(|a| a.button)
    }

    /// An attempt is in progress
    pub fn is_active(&self) -> bool {
        self.attempt.is_some()
    }

    /// `id` is the button that started the current attempt
    pub fn is_same_input(&self, id: ButtonId) -> bool {
        self.button() == Some(id)
    }

    fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.attempt
            .map(|a| now_ms.saturating_sub(a.started_ms))
    }

    /// Hold progress from 0.0 to 1.0 (0.0 with no attempt)
    pub fn progress(&self, now_ms: u64) -> f32 {
        match self.elapsed_ms(now_ms) {
            Some(elapsed) if elapsed >= self.hold_ms as u64 => 1.0,
            Some(elapsed) => elapsed as f32 / self.hold_ms as f32,
            None => 0.0,
        }
    }

    /// Whole seconds of hold still required, rounded up
    pub fn remaining_s(&self, now_ms: u64) -> u32 {
        match self.elapsed_ms(now_ms) {
            Some(elapsed) => {
                let left = (self.hold_ms as u64).saturating_sub(elapsed);
                left.div_ceil(1000) as u32
            }
            None => 0,
        }
    }

    /// The hold has lasted the full duration
    ///
    /// The caller breaks the attempt as soon as the starting button is
    /// released or another button is held, so an attempt that is still
    /// active is still the starting hold.
    pub fn succeeded(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms)
            .map_or(false, |elapsed| elapsed >= self.hold_ms as u64)
    }

    /// True on the first call after [`begin`](Self::begin)
    pub fn take_full_redraw(&mut self) -> bool {
        match self.attempt.as_mut() {
            Some(a) => core::mem::take(&mut a.full_redraw_pending),
            None => false,
        }
    }
}
