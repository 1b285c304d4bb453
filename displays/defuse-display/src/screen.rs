//! Screen buffer
//!
//! Character grid with per-row dirty tracking, so a partial update only
//! reaches the backend as the rows that actually changed.

use heapless::String;

/// Character rows
pub const SCREEN_ROWS: usize = 8;

/// Character columns
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Text screen
#[derive(Clone)]
pub struct Screen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Inverted region per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Bit per row that changed since the last flush
    dirty: u8,
    /// Display must be blanked before drawing
    needs_clear: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Empty screen, blank-and-draw pending
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            dirty: u8::MAX,
            needs_clear: true,
        }
    }

    /// Erase everything; the next flush blanks the display first
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
        self.dirty = u8::MAX;
        self.needs_clear = true;
    }

    /// Replace a row; unchanged content does not dirty it
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let text = truncate(text, LINE_LEN);
        if line.as_str() == text {
            return;
        }
        line.clear();
        let _ = line.push_str(text);
        self.dirty |= 1 << row;
    }

    /// Replace a row with `text` centered
    pub fn set_line_centered(&mut self, row: usize, text: &str) {
        let text = truncate(text, LINE_LEN);
        let pad = (LINE_LEN - text.len()) / 2;
        let mut line: String<LINE_LEN> = String::new();
        for _ in 0..pad {
            let _ = line.push(' ');
        }
        let _ = line.push_str(text);
        self.set_line(row, &line);
    }

    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Invert `start_col..end_col` on a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row < SCREEN_ROWS && self.highlights[row] != Some((start_col, end_col)) {
            self.highlights[row] = Some((start_col, end_col));
            self.dirty |= 1 << row;
        }
    }

    pub fn clear_highlight(&mut self, row: usize) {
        if row < SCREEN_ROWS && self.highlights[row].is_some() {
            self.highlights[row] = None;
            self.dirty |= 1 << row;
        }
    }

    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    pub fn is_row_dirty(&self, row: usize) -> bool {
        row < SCREEN_ROWS && self.dirty & (1 << row) != 0
    }

    /// Rows changed since the last flush, top to bottom
    pub fn dirty_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SCREEN_ROWS).filter(move |row| self.is_row_dirty(*row))
    }

    pub fn needs_clear(&self) -> bool {
        self.needs_clear
    }

    /// Everything has reached the display
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
        self.needs_clear = false;
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

/// Longest prefix of `text` that fits in `max` bytes on a char boundary
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
