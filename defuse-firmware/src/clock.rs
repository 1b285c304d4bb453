//! Uptime clock

use defuse_core::traits::Clock;
use embassy_time::Instant;

/// Milliseconds since the clock was created
pub struct UptimeClock {
    start: Instant,
}

impl UptimeClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis()
    }
}
