//! Input handling and the editor session.
//!
//! This module translates host keyboard and mouse events into drawing actions.
//! [`InputState`] owns the shape collection, the undo history and the shape
//! registry, drives the [`Draft`](crate::draw::Draft) of the shape currently
//! being drawn, and wires save/load into the history.

pub mod events;
pub mod modifiers;
pub mod state;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::{Action, InputState, LoadSummary};
