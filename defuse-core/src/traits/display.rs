//! Display output

use crate::output::Frame;

/// Receives render requests from the machine
///
/// Rendering failures are the sink's problem; nothing is reported back.
pub trait DisplaySink {
    /// Draw `frame`, either from scratch or as a partial update
    /// as indicated by [`Frame::redraw`]
    fn render(&mut self, frame: &Frame);
}
