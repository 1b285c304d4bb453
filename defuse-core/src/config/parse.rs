//! Minimal TOML-subset parser for prop configuration
//!
//! Handles only what a prop config file needs, without allocation:
//!
//! - `[section]` and `[section.subsection]` headers
//! - `key = value` with unsigned integers (underscores allowed),
//!   booleans and double-quoted strings
//! - `#` comments, whole-line or trailing
//!
//! Parsing starts from [`PropConfig::default`], so every key is optional,
//! except that a `[tones.*]` table that is present must set both of its
//! keys. Unknown sections and keys are rejected rather than ignored.
//!
//! ```toml
//! [timing]
//! hold_ms = 5_000
//!
//! [tones.alarm]
//! frequency_hz = 1500
//! duration_ms = 10_000
//!
//! [policy]
//! tie_break = "disarm"
//! ```

use super::types::{ConfigError, PropConfig, TieBreak, Tone};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed `[...]` header
    InvalidSection,
    /// Header names a section this config does not have
    UnknownSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    MalformedLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Table is present but lacks a required key
    MissingKey,
    /// Syntax was fine but the resulting config is unusable
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Tones,
    Click,
    Beep,
    Alarm,
    Policy,
}

impl Section {
    fn is_tone(self) -> bool {
        matches!(self, Section::Click | Section::Beep | Section::Alarm)
    }
}

const FREQUENCY_SEEN: u8 = 1 << 0;
const DURATION_SEEN: u8 = 1 << 1;

/// Parse configuration text into a validated [`PropConfig`]
pub fn parse_config(input: &str) -> Result<PropConfig, ParseError> {
    let mut config = PropConfig::default();
    let mut section = Section::Root;
    // Keys set so far in the current tone table
    let mut tone_keys = 0u8;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            finish_section(section, tone_keys)?;
            section = parse_section_header(name.trim())?;
            tone_keys = 0;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::MalformedLine)?;
        let key = key.trim();
        apply_key(&mut config, section, key, value.trim())?;
        tone_keys |= match key {
            "frequency_hz" => FREQUENCY_SEEN,
            "duration_ms" => DURATION_SEEN,
            _ => 0,
        };
    }
    finish_section(section, tone_keys)?;

    config.validate()?;
    Ok(config)
}

/// A tone table must set both pitch and length
fn finish_section(section: Section, tone_keys: u8) -> Result<(), ParseError> {
    if section.is_tone() && tone_keys != FREQUENCY_SEEN | DURATION_SEEN {
        return Err(ParseError::MissingKey);
    }
    Ok(())
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    if name.is_empty() {
        return Err(ParseError::InvalidSection);
    }

    match name {
        "timing" => Ok(Section::Timing),
        "tones" => Ok(Section::Tones),
        "tones.click" => Ok(Section::Click),
        "tones.beep" => Ok(Section::Beep),
        "tones.alarm" => Ok(Section::Alarm),
        "policy" => Ok(Section::Policy),
        _ => Err(ParseError::UnknownSection),
    }
}

fn apply_key(
    config: &mut PropConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Timing => {
            let t = &mut config.timing;
            let slot = match key {
                "debounce_ms" => &mut t.debounce_ms,
                "hold_ms" => &mut t.hold_ms,
                "auto_repeat_delay_ms" => &mut t.auto_repeat_delay_ms,
                "auto_repeat_interval_ms" => &mut t.auto_repeat_interval_ms,
                "step_ms" => &mut t.step_ms,
                "beep_gap_ms" => &mut t.beep_gap_ms,
                "fast_beep_gap_ms" => &mut t.fast_beep_gap_ms,
                "flash_interval_ms" => &mut t.flash_interval_ms,
                "minute_band_above_s" => &mut t.minute_band_above_s,
                "ten_band_from_s" => &mut t.ten_band_from_s,
                "fast_band_below_s" => &mut t.fast_band_below_s,
                _ => return Err(ParseError::UnknownKey),
            };
            *slot = parse_u32(value)?;
        }
        Section::Click => apply_tone(&mut config.tones.click, key, value)?,
        Section::Beep => apply_tone(&mut config.tones.beep, key, value)?,
        Section::Alarm => apply_tone(&mut config.tones.alarm, key, value)?,
        Section::Policy => match key {
            "tie_break" => {
                config.policy.tie_break = match parse_str(value)? {
                    "disarm" => TieBreak::DisarmWins,
                    "detonate" => TieBreak::DetonationWins,
                    _ => return Err(ParseError::InvalidValue),
                }
            }
            "countdown_during_disarm" => {
                config.policy.countdown_during_disarm = parse_bool(value)?;
            }
            _ => return Err(ParseError::UnknownKey),
        },
        // Tones only has subtables; root has no keys
        Section::Tones | Section::Root => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

fn apply_tone(tone: &mut Tone, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "frequency_hz" => {
            tone.frequency_hz =
                u16::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)?;
        }
        "duration_ms" => tone.duration_ms = parse_u32(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Cut a trailing `# comment`, ignoring `#` inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(d))
            .ok_or(ParseError::InvalidValue)?;
    }
    Ok(result)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_str(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}
