//! Tone output

/// Fire-and-forget tone generator
pub trait ToneSink {
    /// Start a tone, replacing any tone already playing
    fn tone(&mut self, frequency_hz: u16, duration_ms: u32);

    /// Stop any tone immediately
    fn silence(&mut self);
}
