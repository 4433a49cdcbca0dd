mod actions;
mod core;
mod mouse;

pub use actions::{Action, LoadSummary};
pub use core::InputState;
