//! Built-in shape kinds.
//!
//! | kind | geometry | drawing |
//! |---|---|---|
//! | `Line` | two explicit endpoints | drag |
//! | `Rectangle` | normalized box | drag |
//! | `Ellipse` | box the ellipse is inscribed in | drag |
//! | `Polygon` | closed vertex list (≥ 3) | click per vertex |
//! | `Polyline` | open vertex list (≥ 2) | click per vertex |

mod boxed;
mod line;
mod vertex;

pub use boxed::{Ellipse, Rectangle};
pub use line::Line;
pub use vertex::{Polygon, Polyline, VertexOutline};

pub const LINE: &str = "Line";
pub const RECTANGLE: &str = "Rectangle";
pub const ELLIPSE: &str = "Ellipse";
pub const POLYGON: &str = "Polygon";
pub const POLYLINE: &str = "Polyline";

/// Built-in kind names in registration order.
pub const BUILTIN_KINDS: [&str; 5] = [LINE, RECTANGLE, ELLIPSE, POLYGON, POLYLINE];
