//! Single debounced push button

use embedded_hal::digital::InputPin;

/// Electrical setup of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Pressed reads low (button to ground, pull-up enabled)
    pub active_low: bool,
    /// Raw level must be stable this long before it is accepted
    pub settle_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_low: true,
            settle_ms: 20,
        }
    }
}

/// Push button with bounce filtering, edge and hold tracking
///
/// Call [`poll`](Self::poll) once per tick; the edge accessors describe
/// what happened during that poll only.
pub struct DebouncedButton<P> {
    pin: P,
    config: ButtonConfig,
    /// Last raw reading (logical, true = pressed) and when it last changed
    raw: bool,
    raw_since_ms: u64,
    /// Accepted level
    stable: bool,
    /// When the accepted level became pressed
    pressed_since_ms: Option<u64>,
    pressed_edge: bool,
    released_edge: bool,
    now_ms: u64,
    read_errors: u32,
}

impl<P: InputPin> DebouncedButton<P> {
    /// Wrap a pin; the button starts released
    pub fn new(pin: P, config: ButtonConfig) -> Self {
        Self {
            pin,
            config,
            raw: false,
            raw_since_ms: 0,
            stable: false,
            pressed_since_ms: None,
            pressed_edge: false,
            released_edge: false,
            now_ms: 0,
            read_errors: 0,
        }
    }

    /// Sample the pin at `now_ms`
    pub fn poll(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        self.pressed_edge = false;
        self.released_edge = false;

        let pressed = match self.pin.is_high() {
            Ok(high) => high != self.config.active_low,
            Err(_) => {
                self.read_errors = self.read_errors.saturating_add(1);
                return;
            }
        };

        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
        }

        let settled = now_ms.saturating_sub(self.raw_since_ms) >= self.config.settle_ms as u64;
        if self.raw != self.stable && settled {
            self.stable = self.raw;
            if self.stable {
                self.pressed_edge = true;
                self.pressed_since_ms = Some(now_ms);
            } else {
                self.released_edge = true;
                self.pressed_since_ms = None;
            }
        }
    }

    /// Went down during the last poll
    pub fn was_pressed(&self) -> bool {
        self.pressed_edge
    }

    /// Came up during the last poll
    pub fn was_released(&self) -> bool {
        self.released_edge
    }

    /// Currently down
    pub fn is_held(&self) -> bool {
        self.stable
    }

    /// Down continuously for at least `ms`
    pub fn held_for(&self, ms: u32) -> bool {
        self.pressed_since_ms
            .map_or(false, |since| self.now_ms.saturating_sub(since) >= ms as u64)
    }

    /// Failed pin reads so far
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}
