//! Display backend that writes screen rows to the defmt log
//!
//! Stands in for a physical panel: every flushed row is logged, and
//! inverted regions are reported so the selected field is visible.

use defmt::*;

use defuse_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

pub struct ConsoleBackend {
    /// Rows drawn since the last flush
    pending: u8,
}

impl ConsoleBackend {
    pub fn new() -> Self {
        Self { pending: 0 }
    }
}

impl DisplayBackend for ConsoleBackend {
    fn clear(&mut self) -> Result<(), DisplayError> {
        debug!("display: clear");
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || col as usize >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        info!("display[{}]: |{}|", row, text);
        self.pending = self.pending.saturating_add(1);
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || end_col as usize > SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        debug!("display[{}]: invert {}..{}", row, start_col, end_col);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        trace!("display: flush ({} rows)", self.pending);
        self.pending = 0;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        true
    }
}
