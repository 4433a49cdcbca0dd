//! Library exports for the vectorpad editor core.
//!
//! Exposes the shape model, the drawing state machine, the undo/redo engine, the
//! shape registry and drawing persistence so that hosts (a windowed front end,
//! the bundled CLI, tests) can drive the same editing logic.

pub mod config;
pub mod draw;
pub mod error;
pub mod history;
pub mod input;
pub mod plugins;
pub mod registry;
pub mod script;
pub mod session;
pub mod util;

pub use config::Config;
pub use draw::{Canvas, Color, Draft, Phase, Shape, Style};
pub use error::{DrawError, Result};
pub use history::{Command, History};
pub use input::InputState;
pub use registry::{PluginDescriptor, ShapeRegistry};
