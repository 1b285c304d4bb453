//! Capability traits
//!
//! The machine never touches hardware. A driving loop hands it these
//! capabilities, which makes the whole core testable with a fake clock
//! and scripted input.

pub mod clock;
pub mod display;
pub mod input;
pub mod tone;

pub use clock::Clock;
pub use display::DisplaySink;
pub use input::InputSource;
pub use tone::ToneSink;
