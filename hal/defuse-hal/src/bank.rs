//! The prop's three buttons as one input source

use defuse_core::input::ButtonId;
use defuse_core::traits::InputSource;
use embedded_hal::digital::InputPin;

use crate::button::{ButtonConfig, DebouncedButton};

/// Buttons A, B and C
pub struct ButtonBank<P> {
    buttons: [DebouncedButton<P>; 3],
}

impl<P: InputPin> ButtonBank<P> {
    /// Build a bank with the same electrical setup on every button
    pub fn new(a: P, b: P, c: P, config: ButtonConfig) -> Self {
        Self {
            buttons: [
                DebouncedButton::new(a, config),
                DebouncedButton::new(b, config),
                DebouncedButton::new(c, config),
            ],
        }
    }

    pub fn button(&self, id: ButtonId) -> &DebouncedButton<P> {
        &self.buttons[id.index()]
    }

    /// Failed pin reads across all buttons
    pub fn read_errors(&self) -> u32 {
        self.buttons
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.read_errors()))
    }
}

impl<P: InputPin> InputSource for ButtonBank<P> {
    fn poll(&mut self, now_ms: u64) {
        for button in &mut self.buttons {
            button.poll(now_ms);
        }
    }

    fn was_pressed(&self, id: ButtonId) -> bool {
        self.button(id).was_pressed()
    }

    fn is_held(&self, id: ButtonId) -> bool {
        self.button(id).is_held()
    }

    fn held_for(&self, id: ButtonId, ms: u32) -> bool {
        self.button(id).held_for(ms)
    }
}
