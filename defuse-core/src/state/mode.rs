/// Top-level phase of operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Choosing the countdown length
    #[default]
    Setup,
    /// Counting down, no hold in progress
    Countdown,
    /// A disarm hold is being timed
    Disarming,
    /// Hold completed before expiry
    Disarmed,
    /// Countdown reached zero
    Detonated,
}

impl Mode {
    /// The countdown is live in this mode
    pub fn is_armed(self) -> bool {
        matches!(self, Mode::Countdown | Mode::Disarming)
    }

    /// Terminal modes wait for a press to return to Setup
    pub fn is_terminal(self) -> bool {
        matches!(self, Mode::Disarmed | Mode::Detonated)
    }

    /// Short label for logs and screens
    pub fn name(self) -> &'static str {
        match self {
            Mode::Setup => "setup",
            Mode::Countdown => "countdown",
            Mode::Disarming => "disarming",
            Mode::Disarmed => "disarmed",
            Mode::Detonated => "detonated",
        }
    }

    /// `self -> next` is an edge of the mode graph
    ///
    /// Staying in the same mode is always allowed.
    pub fn can_transition_to(self, next: Mode) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Mode::Setup, Mode::Countdown)
                | (Mode::Countdown, Mode::Disarming)
                | (Mode::Countdown, Mode::Detonated)
                | (Mode::Disarming, Mode::Countdown)
                | (Mode::Disarming, Mode::Disarmed)
                | (Mode::Disarming, Mode::Detonated)
                | (Mode::Disarmed, Mode::Setup)
                | (Mode::Detonated, Mode::Setup)
        )
    }
}
