//! Display backend trait
//!
//! Interface to whatever actually shows characters.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or link to the display failed
    Communication,
    /// Row or column outside the display
    InvalidCoordinates,
    /// Display has not finished starting up
    NotInitialized,
}

/// Character display
///
/// Coordinates are in character cells. Implementations may buffer until
/// [`flush`](DisplayBackend::flush).
pub trait DisplayBackend {
    /// Blank the whole display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write `text` starting at `row`, `col`
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert cells `start_col..end_col` of `row`
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Push buffered content out
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// (columns, rows) in characters
    fn dimensions(&self) -> (u8, u8);

    fn is_ready(&self) -> bool;
}
