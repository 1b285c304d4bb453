//! Button input source

use crate::input::ButtonId;

/// Source of button state for the three logical buttons
///
/// [`poll`](InputSource::poll) must be called once per tick before any
/// query; queries describe the state as of the most recent poll.
pub trait InputSource {
    /// Sample the hardware
    fn poll(&mut self, now_ms: u64);

    /// Button went from released to pressed since the previous poll
    fn was_pressed(&self, id: ButtonId) -> bool;

    /// Button is currently pressed
    fn is_held(&self, id: ButtonId) -> bool;

    /// Button has been pressed continuously for at least `ms`
    fn held_for(&self, id: ButtonId, ms: u32) -> bool;
}
