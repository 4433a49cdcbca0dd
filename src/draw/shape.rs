//! The contract every shape kind implements, built-in or plugin-supplied.

use super::color::{Color, DEFAULT_FILL, DEFAULT_STROKE};
use super::geometry::{Geometry, Path};
use crate::error::{DrawError, Result};
use crate::util::{Point, Rect};
use std::fmt;

/// Paint attributes shared by every shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Outline color
    pub stroke: Color,
    /// Interior color (transparent means "no fill")
    pub fill: Color,
    /// Outline thickness, never negative
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE,
            fill: DEFAULT_FILL,
            stroke_width: 1.0,
        }
    }
}

impl Style {
    /// Builds a style, rejecting negative or non-finite stroke widths.
    pub fn new(stroke: Color, fill: Color, stroke_width: f64) -> Result<Self> {
        validate_stroke_width(stroke_width)?;
        Ok(Self {
            stroke,
            fill,
            stroke_width,
        })
    }

    /// Wraps a path into a renderable geometry painted with this style.
    pub fn paint(&self, path: Path) -> Geometry {
        Geometry {
            path,
            stroke: self.stroke,
            fill: self.fill,
            stroke_width: self.stroke_width,
            dashed: false,
        }
    }
}

pub(crate) fn validate_stroke_width(width: f64) -> Result<()> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(DrawError::InvalidAttribute(format!(
            "stroke width must be a non-negative number, got {width}"
        )))
    }
}

/// How a shape kind is created interactively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawingMode {
    /// One press-drag-release gesture defines the whole shape.
    Drag,
    /// Each primary click commits a vertex; an explicit finish input ends the
    /// shape once at least `min_vertices` are committed.
    Click { min_vertices: usize },
}

impl DrawingMode {
    pub fn is_multi_step(&self) -> bool {
        matches!(self, DrawingMode::Click { .. })
    }
}

/// A drawable shape.
///
/// `kind` identifies both the behavior and the persisted type name. Bounds and
/// vertices follow one rule: when a shape has vertices, its bounds are the tight
/// bounding box of those vertices and are never stored independently.
///
/// Implementors only need to provide storage access, geometry conversion and
/// `clone_box`; attribute setters with validation come for free.
pub trait Shape: fmt::Debug {
    /// Stable, non-empty type name (registry key and persisted tag).
    fn kind(&self) -> &str;

    fn style(&self) -> &Style;

    /// Direct access to the paint attributes. Prefer the validating setters.
    fn style_mut(&mut self) -> &mut Style;

    fn bounds(&self) -> Rect;

    /// Replaces the bounding box. Kinds whose geometry is vertex-based keep
    /// their derived bounds while vertices are present.
    fn set_bounds(&mut self, bounds: Rect);

    /// Ordered vertices; empty for bounds-only kinds.
    fn vertices(&self) -> &[Point];

    /// Replaces the vertices and re-derives the bounds from them.
    fn set_vertices(&mut self, vertices: Vec<Point>) -> Result<()>;

    /// Produces the final visual from the current attributes. Pure.
    fn materialize(&self) -> Geometry;

    /// Inverse of [`Shape::materialize`]: adopts the outline of an externally
    /// adjusted geometry.
    fn sync_from_renderable(&mut self, geometry: &Geometry) -> Result<()>;

    fn clone_box(&self) -> Box<dyn Shape>;

    /// Capability flag consulted by the drawing state machine and the host.
    fn drawing_mode(&self) -> DrawingMode {
        DrawingMode::Drag
    }

    /// Sets the geometry spanned by a drag from `anchor` to `current`.
    ///
    /// Only called for [`DrawingMode::Drag`] kinds. The default spans a
    /// normalized box between the two points.
    fn drag(&mut self, anchor: Point, current: Point) {
        self.set_bounds(Rect::from_corners(anchor, current));
    }

    fn stroke_color(&self) -> Color {
        self.style().stroke
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.style_mut().stroke = color;
    }

    fn fill_color(&self) -> Color {
        self.style().fill
    }

    fn set_fill_color(&mut self, color: Color) {
        self.style_mut().fill = color;
    }

    fn stroke_width(&self) -> f64 {
        self.style().stroke_width
    }

    /// Rejects negative widths with [`DrawError::InvalidAttribute`].
    fn set_stroke_width(&mut self, width: f64) -> Result<()> {
        validate_stroke_width(width)?;
        self.style_mut().stroke_width = width;
        Ok(())
    }

    /// Applies all paint attributes at once.
    fn set_style(&mut self, style: Style) -> Result<()> {
        validate_stroke_width(style.stroke_width)?;
        *self.style_mut() = style;
        Ok(())
    }
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn Shape {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.style() == other.style()
            && self.bounds() == other.bounds()
            && self.vertices() == other.vertices()
    }
}

/// Error returned by `sync_from_renderable` when the geometry does not fit the kind.
pub(crate) fn mismatched_geometry(kind: &str, geometry: &Geometry) -> DrawError {
    DrawError::InvalidAttribute(format!(
        "{kind} cannot adopt {} geometry",
        geometry.path.name()
    ))
}
