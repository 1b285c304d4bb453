//! Countdown duration entry
//!
//! The duration is three bounded fields edited one at a time. All
//! mutation wraps within the field's modulus, so out-of-range values
//! cannot be entered.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3600;

/// Editable duration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    #[default]
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// Fields in cursor order
    pub const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    /// Position of this field (0-2)
    pub const fn index(self) -> usize {
        match self {
            Field::Hours => 0,
            Field::Minutes => 1,
            Field::Seconds => 2,
        }
    }

    /// Next field, wrapping from seconds back to hours
    pub const fn next(self) -> Self {
        match self {
            Field::Hours => Field::Minutes,
            Field::Minutes => Field::Seconds,
            Field::Seconds => Field::Hours,
        }
    }

    /// Number of distinct values the field can hold
    pub const fn modulus(self) -> u8 {
        match self {
            Field::Hours => 24,
            Field::Minutes | Field::Seconds => 60,
        }
    }
}

/// Hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hms {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Hms {
    /// Create a value, wrapping each field into its range
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours: hours % Field::Hours.modulus(),
            minutes: minutes % Field::Minutes.modulus(),
            seconds: seconds % Field::Seconds.modulus(),
        }
    }

    /// Split a second count for display
    ///
    /// Hours saturate at 255; any count reachable from a valid duration
    /// stays below 24 hours.
    pub fn from_total_seconds(total: u32) -> Self {
        let hours = u8::try_from(total / SECONDS_PER_HOUR).unwrap_or(u8::MAX);
        Self {
            hours,
            minutes: ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            seconds: (total % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// Total length in seconds
    pub const fn total_seconds(&self) -> u32 {
        self.hours as u32 * SECONDS_PER_HOUR
            + self.minutes as u32 * SECONDS_PER_MINUTE
            + self.seconds as u32
    }

    /// Value of a single field
    pub const fn get(&self, field: Field) -> u8 {
        match field {
            Field::Hours => self.hours,
            Field::Minutes => self.minutes,
            Field::Seconds => self.seconds,
        }
    }

    fn slot(&mut self, field: Field) -> &mut u8 {
        match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }
}

/// Duration being configured plus the field cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DurationSetting {
    value: Hms,
    cursor: Field,
}

impl DurationSetting {
    /// Start editing `value` with the cursor on hours
    pub const fn new(value: Hms) -> Self {
        Self {
            value,
            cursor: Field::Hours,
        }
    }

    /// Current value
    pub const fn value(&self) -> Hms {
        self.value
    }

    /// Field that responds to increment/decrement
    pub const fn cursor(&self) -> Field {
        self.cursor
    }

    /// Total configured seconds
    pub const fn total_seconds(&self) -> u32 {
        self.value.total_seconds()
    }

    /// Move the cursor to the next field
    pub fn cycle_field(&mut self) {
        self.cursor = self.cursor.next();
    }

    /// Increase the selected field by one, wrapping to zero
    pub fn increment(&mut self) {
        let modulus = self.cursor.modulus();
        let slot = self.value.slot(self.cursor);
        *slot = (*slot + 1) % modulus;
    }

    /// Decrease the selected field by one, wrapping to the maximum
    pub fn decrement(&mut self) {
        let modulus = self.cursor.modulus();
        let slot = self.value.slot(self.cursor);
        *slot = (*slot + modulus - 1) % modulus;
    }
}
