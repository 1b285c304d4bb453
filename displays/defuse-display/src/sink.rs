//! Display sink
//!
//! Adapts a [`DisplayBackend`] to the core's `DisplaySink`. Rendering
//! problems stay here: a frame that fails to reach the backend is counted
//! and its rows stay dirty, so the next frame retries them.

use defuse_core::output::Frame;
use defuse_core::traits::DisplaySink;
use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};
use crate::renderer;
use crate::screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};

/// Screen buffer plus the backend it is flushed to
pub struct ScreenSink<B> {
    backend: B,
    screen: Screen,
    failed_frames: u32,
}

impl<B: DisplayBackend> ScreenSink<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            screen: Screen::new(),
            failed_frames: 0,
        }
    }

    /// Frames that did not reach the display
    pub fn failed_frames(&self) -> u32 {
        self.failed_frames
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Send dirty rows to the backend
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }
        let (cols, rows) = self.backend.dimensions();
        if (cols as usize) < SCREEN_COLS || (rows as usize) < SCREEN_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        if !self.screen.is_dirty() && !self.screen.needs_clear() {
            return Ok(());
        }

        if self.screen.needs_clear() {
            self.backend.clear()?;
        }

        for row in self.screen.dirty_rows() {
            let text = self.screen.get_line(row).unwrap_or("");
            // Pad so shorter text overwrites what was there
            let mut padded: String<LINE_LEN> = String::new();
            let _ = padded.push_str(text);
            while padded.len() < LINE_LEN {
                let _ = padded.push(' ');
            }
            self.backend.draw_text(row as u8, 0, &padded)?;

            if let Some((start, end)) = self.screen.get_highlight(row) {
                self.backend.invert_region(row as u8, start, end)?;
            }
        }

        self.backend.flush()?;
        self.screen.mark_clean();
        Ok(())
    }
}

impl<B: DisplayBackend> DisplaySink for ScreenSink<B> {
    fn render(&mut self, frame: &Frame) {
        renderer::render(&mut self.screen, frame);
        if self.flush().is_err() {
            self.failed_frames = self.failed_frames.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{BAR_ROW, HOLD_ROW};
    use defuse_core::output::Redraw;
    use defuse_core::setup::{Field, Hms};
    use defuse_core::state::Mode;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Text(u8, std::string::String),
        Invert(u8, u8, u8),
        Flush,
    }

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        fail_flush: bool,
        not_ready: bool,
        /// Reported size, full screen when unset
        size: Option<(u8, u8)>,
    }

    impl RecordingBackend {
        fn text_rows(&self) -> Vec<u8> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(row, _) => Some(*row),
                    _ => None,
                })
                .collect()
        }
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            self.calls.push(Call::Text(row, text.into()));
            Ok(())
        }

        fn invert_region(&mut self, row: u8, start: u8, end: u8) -> Result<(), DisplayError> {
            self.calls.push(Call::Invert(row, start, end));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail_flush {
                return Err(DisplayError::Communication);
            }
            self.calls.push(Call::Flush);
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            self.size
                .unwrap_or((SCREEN_COLS as u8, SCREEN_ROWS as u8))
        }

        fn is_ready(&self) -> bool {
            !self.not_ready
        }
    }

    fn disarming(redraw: Redraw, progress: f32, hold_remaining_s: u32) -> Frame {
        Frame {
            mode: Mode::Disarming,
            redraw,
            cursor: Field::Hours,
            time: Hms::new(0, 0, 20),
            progress,
            hold_remaining_s,
            flash_on: false,
        }
    }

    #[test]
    fn test_full_frame_clears_and_draws_every_row() {
        let mut sink = ScreenSink::new(RecordingBackend::default());
        sink.render(&disarming(Redraw::Full, 0.0, 5));

        let calls = &sink.backend().calls;
        assert_eq!(calls.first(), Some(&Call::Clear));
        assert_eq!(calls.last(), Some(&Call::Flush));
        assert_eq!(sink.backend().text_rows().len(), SCREEN_ROWS);
        assert!(calls.iter().all(|c| match c {
            Call::Text(_, text) => text.len() == LINE_LEN,
            _ => true,
        }));
        assert_eq!(sink.failed_frames(), 0);
    }

    #[test]
    fn test_partial_frame_sends_changed_rows_only() {
        let mut sink = ScreenSink::new(RecordingBackend::default());
        sink.render(&disarming(Redraw::Full, 0.0, 5));
        sink.backend_mut().calls.clear();

        sink.render(&disarming(Redraw::Partial, 0.5, 3));

        assert!(!sink.backend().calls.contains(&Call::Clear));
        assert_eq!(sink.backend().text_rows(), [BAR_ROW as u8, HOLD_ROW as u8]);
    }

    #[test]
    fn test_highlight_sent_after_text() {
        let mut sink = ScreenSink::new(RecordingBackend::default());
        sink.render(&Frame {
            mode: Mode::Setup,
            redraw: Redraw::Full,
            cursor: Field::Seconds,
            time: Hms::new(0, 0, 0),
            progress: 0.0,
            hold_remaining_s: 0,
            flash_on: false,
        });

        let calls = &sink.backend().calls;
        let invert = calls
            .iter()
            .position(|c| *c == Call::Invert(4, 0, SCREEN_COLS as u8))
            .expect("selected row inverted");
        assert!(matches!(calls[invert - 1], Call::Text(4, _)));
    }

    #[test]
    fn test_failed_flush_counted_and_retried() {
        let mut sink = ScreenSink::new(RecordingBackend {
            fail_flush: true,
            ..Default::default()
        });
        sink.render(&disarming(Redraw::Full, 0.0, 5));
        assert_eq!(sink.failed_frames(), 1);
        assert!(sink.screen().needs_clear());

        sink.backend_mut().fail_flush = false;
        sink.backend_mut().calls.clear();
        sink.render(&disarming(Redraw::Partial, 0.2, 4));
        assert_eq!(sink.failed_frames(), 1);
        // Rows from the failed frame go out with this one
        assert_eq!(sink.backend().calls.first(), Some(&Call::Clear));
        assert_eq!(sink.backend().text_rows().len(), SCREEN_ROWS);
    }

    #[test]
    fn test_not_ready_backend() {
        let mut sink = ScreenSink::new(RecordingBackend {
            not_ready: true,
            ..Default::default()
        });
        sink.render(&disarming(Redraw::Full, 0.0, 5));
        assert_eq!(sink.failed_frames(), 1);
        assert!(sink.backend().calls.is_empty());
    }

    #[test]
    fn test_undersized_backend_rejected() {
        let mut sink = ScreenSink::new(RecordingBackend {
            size: Some((16, 2)),
            ..Default::default()
        });
        assert_eq!(sink.flush(), Err(DisplayError::InvalidCoordinates));

        sink.render(&disarming(Redraw::Full, 0.0, 5));
        assert_eq!(sink.failed_frames(), 1);
        assert!(sink.backend().calls.is_empty());
        assert!(sink.screen().needs_clear());
    }
}
