//! Button identity, per-tick input snapshots and edge shaping
//!
//! Inputs are sampled once per tick into an [`InputSnapshot`]; the
//! machine only ever looks at snapshots. [`EdgeGuard`] suppresses edges
//! for a short window after a handled press, [`HoldLatch`] remembers
//! buttons that must be let go before they count again, and
//! [`AutoRepeat`] turns a long hold into a rate-limited stream of steps.

use crate::traits::InputSource;

/// Logical button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    A,
    B,
    C,
}

impl ButtonId {
    /// All buttons, in priority order
    pub const ALL: [ButtonId; 3] = [ButtonId::A, ButtonId::B, ButtonId::C];

    /// Position of this button in [`ButtonId::ALL`]
    pub const fn index(self) -> usize {
        match self {
            ButtonId::A => 0,
            ButtonId::B => 1,
            ButtonId::C => 2,
        }
    }
}

/// State of one button for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Pressed edge since the previous tick
    pub pressed: bool,
    /// Currently held
    pub held: bool,
    /// Held long enough for auto-repeat
    pub repeat_ready: bool,
}

/// Debounced view of all buttons for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    buttons: [ButtonState; 3],
}

impl InputSnapshot {
    /// No button activity
    pub const fn idle() -> Self {
        Self {
            buttons: [ButtonState {
                pressed: false,
                held: false,
                repeat_ready: false,
            }; 3],
        }
    }

    /// Read an already-polled input source
    pub fn sample<I: InputSource + ?Sized>(input: &I, repeat_delay_ms: u32) -> Self {
        let mut snapshot = Self::idle();
        for id in ButtonId::ALL {
            snapshot.buttons[id.index()] = ButtonState {
                pressed: input.was_pressed(id),
                held: input.is_held(id),
                repeat_ready: input.held_for(id, repeat_delay_ms),
            };
        }
        snapshot
    }

    /// Add a fresh press (edge plus level)
    pub fn with_pressed(mut self, id: ButtonId) -> Self {
        let b = &mut self.buttons[id.index()];
        b.pressed = true;
        b.held = true;
        self
    }

    /// Add a continuing hold (level only)
    pub fn with_held(mut self, id: ButtonId) -> Self {
        self.buttons[id.index()].held = true;
        self
    }

    /// Add a hold long enough for auto-repeat
    pub fn with_repeat(mut self, id: ButtonId) -> Self {
        let b = &mut self.buttons[id.index()];
        b.held = true;
        b.repeat_ready = true;
        self
    }

    /// Full state of one button
    pub fn button(&self, id: ButtonId) -> ButtonState {
        self.buttons[id.index()]
    }

    /// Button had a pressed edge this tick
    pub fn pressed(&self, id: ButtonId) -> bool {
        self.buttons[id.index()].pressed
    }

    /// Button is held
    pub fn held(&self, id: ButtonId) -> bool {
        self.buttons[id.index()].held
    }

    /// Button is ready for auto-repeat
    pub fn repeat_ready(&self, id: ButtonId) -> bool {
        self.buttons[id.index()].repeat_ready
    }

    /// First button, in priority order, with a pressed edge
    pub fn first_pressed(&self) -> Option<ButtonId> {
        ButtonId::ALL.into_iter().find(|id| self.pressed(*id))
    }

    /// Any button had a pressed edge
    pub fn any_pressed(&self) -> bool {
        self.first_pressed().is_some()
    }

    /// Any button other than `id` is held
    pub fn any_held_except(&self, id: ButtonId) -> bool {
        ButtonId::ALL
            .into_iter()
            .any(|other| other != id && self.held(other))
    }
}

/// Non-blocking debounce: ignore edges until a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeGuard {
    until_ms: Option<u64>,
}

impl EdgeGuard {
    /// Guard that accepts edges immediately
    pub const fn new() -> Self {
        Self { until_ms: None }
    }

    /// Edges are accepted at `now_ms`
    pub fn is_open(&self, now_ms: u64) -> bool {
        self.until_ms.map_or(true, |until| now_ms >= until)
    }

    /// Ignore edges for `window_ms` from `now_ms`
    pub fn arm(&mut self, now_ms: u64, window_ms: u32) {
        self.until_ms = Some(now_ms.saturating_add(window_ms as u64));
    }
}

/// Buttons that must be released before their hold counts
///
/// A latched button stays latched while it is held. Seeing it released,
/// or seeing a fresh pressed edge (it was released between ticks),
/// frees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldLatch {
    latched: [bool; 3],
}

impl HoldLatch {
    pub const fn new() -> Self {
        Self {
            latched: [false; 3],
        }
    }

    /// Latch every button held in `input`
    pub fn latch_held(&mut self, input: &InputSnapshot) {
        for id in ButtonId::ALL {
            if input.held(id) {
                self.latched[id.index()] = true;
            }
        }
    }

    /// Free buttons that have been let go since they were latched
    pub fn update(&mut self, input: &InputSnapshot) {
        for id in ButtonId::ALL {
            if !input.held(id) || input.pressed(id) {
                self.latched[id.index()] = false;
            }
        }
    }

    pub fn is_latched(&self, id: ButtonId) -> bool {
        self.latched[id.index()]
    }

    /// The one held, unlatched button, if exactly one button is held
    pub fn sole_free_hold(&self, input: &InputSnapshot) -> Option<ButtonId> {
        let id = ButtonId::ALL.into_iter().find(|id| input.held(*id))?;
        if self.is_latched(id) || input.any_held_except(id) {
            return None;
        }
        Some(id)
    }
}

/// Rate limiter for auto-repeat on a held button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutoRepeat {
    last_fired_ms: Option<u64>,
}

impl AutoRepeat {
    pub const fn new() -> Self {
        Self {
            last_fired_ms: None,
        }
    }

    /// Returns true when a repeat step is due
    ///
    /// The first step fires as soon as `ready` goes true; later steps wait
    /// `interval_ms`. Releasing the button (`ready == false`) resets it.
    pub fn fire(&mut self, now_ms: u64, interval_ms: u32, ready: bool) -> bool {
        if !ready {
            self.last_fired_ms = None;
            return false;
        }

        match self.last_fired_ms {
            Some(last) if now_ms.saturating_sub(last) < interval_ms as u64 => false,
            _ => {
                self.last_fired_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedInput {
        pressed: [bool; 3],
        held_ms: [Option<u32>; 3],
    }

    impl InputSource for ScriptedInput {
        fn poll(&mut self, _now_ms: u64) {}

        fn was_pressed(&self, id: ButtonId) -> bool {
            self.pressed[id.index()]
        }

        fn is_held(&self, id: ButtonId) -> bool {
            self.held_ms[id.index()].is_some()
        }

        fn held_for(&self, id: ButtonId, ms: u32) -> bool {
            self.held_ms[id.index()].map_or(false, |held| held >= ms)
        }
    }

    #[test]
    fn test_sample_reads_all_buttons() {
        let input = ScriptedInput {
            pressed: [false, true, false],
            held_ms: [Some(800), Some(0), None],
        };
        let snapshot = InputSnapshot::sample(&input, 500);

        assert_eq!(
            snapshot.button(ButtonId::A),
            ButtonState {
                pressed: false,
                held: true,
                repeat_ready: true
            }
        );
        assert!(snapshot.pressed(ButtonId::B));
        assert!(!snapshot.repeat_ready(ButtonId::B));
        assert!(!snapshot.held(ButtonId::C));
    }

    #[test]
    fn test_first_pressed_priority() {
        let snapshot = InputSnapshot::idle()
            .with_pressed(ButtonId::C)
            .with_pressed(ButtonId::B);
        assert_eq!(snapshot.first_pressed(), Some(ButtonId::B));
        assert_eq!(InputSnapshot::idle().first_pressed(), None);
    }

    #[test]
    fn test_any_held_except() {
        let snapshot = InputSnapshot::idle().with_held(ButtonId::A);
        assert!(!snapshot.any_held_except(ButtonId::A));
        assert!(snapshot.any_held_except(ButtonId::B));
    }

    #[test]
    fn test_edge_guard_window() {
        let mut guard = EdgeGuard::new();
        assert!(guard.is_open(0));

        guard.arm(1000, 200);
        assert!(!guard.is_open(1000));
        assert!(!guard.is_open(1199));
        assert!(guard.is_open(1200));
    }

    #[test]
    fn test_hold_latch_frees_on_release() {
        let mut latch = HoldLatch::new();
        let held_c = InputSnapshot::idle().with_held(ButtonId::C);
        latch.latch_held(&held_c);
        assert!(latch.is_latched(ButtonId::C));
        assert!(!latch.is_latched(ButtonId::A));

        latch.update(&held_c);
        assert!(latch.is_latched(ButtonId::C));
        assert_eq!(latch.sole_free_hold(&held_c), None);

        latch.update(&InputSnapshot::idle());
        assert!(!latch.is_latched(ButtonId::C));
        assert_eq!(latch.sole_free_hold(&held_c), Some(ButtonId::C));
    }

    #[test]
    fn test_hold_latch_frees_on_fresh_edge() {
        let mut latch = HoldLatch::new();
        latch.latch_held(&InputSnapshot::idle().with_held(ButtonId::B));
        latch.update(&InputSnapshot::idle().with_pressed(ButtonId::B));
        assert!(!latch.is_latched(ButtonId::B));
    }

    #[test]
    fn test_sole_free_hold_needs_single_button() {
        let latch = HoldLatch::new();
        let both = InputSnapshot::idle()
            .with_held(ButtonId::A)
            .with_held(ButtonId::B);
        assert_eq!(latch.sole_free_hold(&both), None);
        assert_eq!(latch.sole_free_hold(&InputSnapshot::idle()), None);
        assert_eq!(
            latch.sole_free_hold(&InputSnapshot::idle().with_held(ButtonId::B)),
            Some(ButtonId::B)
        );
    }

    #[test]
    fn test_auto_repeat_rate_limit() {
        let mut repeat = AutoRepeat::new();

        assert!(!repeat.fire(0, 100, false));
        assert!(repeat.fire(500, 100, true));
        assert!(!repeat.fire(550, 100, true));
        assert!(repeat.fire(600, 100, true));
        assert!(!repeat.fire(699, 100, true));
    }

    #[test]
    fn test_auto_repeat_resets_on_release() {
        let mut repeat = AutoRepeat::new();

        assert!(repeat.fire(500, 100, true));
        assert!(!repeat.fire(520, 100, false));
        assert!(repeat.fire(540, 100, true));
    }
}
