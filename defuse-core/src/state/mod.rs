//! Mode state machine

mod machine;
mod mode;

pub use machine::Machine;
pub use mode::Mode;
