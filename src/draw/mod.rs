//! Shape model and interactive drawing.
//!
//! This module defines the core drawing types of the editor:
//! - [`Color`]: RGBA color with `#AARRGGBB` encoding and named constants
//! - [`Shape`]: the contract every shape kind implements, plus the built-in [`kinds`]
//! - [`Draft`]: the state machine that turns pointer input into a finished shape
//! - [`Canvas`]: the ordered shape collection, mirrored onto a [`RenderSurface`]

pub mod canvas;
pub mod color;
pub mod draft;
pub mod geometry;
pub mod kinds;
pub mod shape;

// Re-export commonly used types at module level
pub use canvas::Canvas;
pub use color::Color;
pub use draft::{Draft, Phase};
pub use geometry::{Geometry, NullSurface, Path, RecordingSurface, RenderSurface};
pub use kinds::{Ellipse, Line, Polygon, Polyline, Rectangle, VertexOutline};
pub use shape::{DrawingMode, Shape, Style};

// Re-export color constants for public API
#[allow(unused_imports)]
pub use color::{
    BLACK, BLUE, DEFAULT_FILL, DEFAULT_STROKE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE,
    YELLOW,
};
