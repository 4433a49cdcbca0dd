//! Renderable geometry values and the render surface boundary.
//!
//! A [`Geometry`] is the final, non-interactive description of a shape: a [`Path`]
//! plus the paint attributes needed to turn it into pixels. Turning it into pixels
//! is the job of whatever implements [`RenderSurface`]; the core only hands whole
//! geometry values across that boundary and never reads anything back.

use super::color::Color;
use crate::util::{self, Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;

/// Outline of a renderable shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Path {
    /// Straight segment between two endpoints
    Segment { start: Point, end: Point },
    /// Axis-aligned rectangle
    Rectangle(Rect),
    /// Ellipse inscribed in the given box
    Ellipse(Rect),
    /// Closed outline through the vertices
    Polygon(Vec<Point>),
    /// Open outline through the vertices
    Polyline(Vec<Point>),
}

impl Path {
    /// Short name of the outline type.
    pub fn name(&self) -> &'static str {
        match self {
            Path::Segment { .. } => "segment",
            Path::Rectangle(_) => "rectangle",
            Path::Ellipse(_) => "ellipse",
            Path::Polygon(_) => "polygon",
            Path::Polyline(_) => "polyline",
        }
    }

    /// Tight bounding box of the outline (stroke width not included).
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Path::Segment { start, end } => Some(Rect::from_corners(*start, *end)),
            Path::Rectangle(rect) | Path::Ellipse(rect) => Some(*rect),
            Path::Polygon(points) | Path::Polyline(points) => util::bounding_box(points),
        }
    }
}

/// A fully described visual, ready to be placed on a render surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub path: Path,
    pub stroke: Color,
    pub fill: Color,
    pub stroke_width: f64,
    /// Set on preview geometry so the surface can draw it dashed.
    pub dashed: bool,
}

impl Geometry {
    /// Marks this geometry as a provisional preview.
    pub fn into_preview(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn is_preview(&self) -> bool {
        self.dashed
    }
}

/// Drawing surface owned by the host (window, canvas widget, test double).
pub trait RenderSurface {
    /// Places a visual on top of everything already shown.
    fn add_visual(&mut self, geometry: &Geometry);

    /// Removes a previously added visual.
    fn remove_visual(&mut self, geometry: &Geometry);
}

/// Surface that discards everything, used when no host is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn add_visual(&mut self, _geometry: &Geometry) {}

    fn remove_visual(&mut self, _geometry: &Geometry) {}
}

/// Surface that keeps the list of visuals currently shown.
///
/// Clones share the same list, so a caller can hand one clone to a
/// [`Canvas`](super::Canvas) and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    visuals: Rc<RefCell<Vec<Geometry>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the visuals in paint order.
    pub fn visuals(&self) -> Vec<Geometry> {
        self.visuals.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.visuals.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.borrow().is_empty()
    }

    /// Number of visuals flagged as previews.
    pub fn preview_count(&self) -> usize {
        self.visuals.borrow().iter().filter(|g| g.dashed).count()
    }
}

impl RenderSurface for RecordingSurface {
    fn add_visual(&mut self, geometry: &Geometry) {
        self.visuals.borrow_mut().push(geometry.clone());
    }

    fn remove_visual(&mut self, geometry: &Geometry) {
        let mut visuals = self.visuals.borrow_mut();
        if let Some(index) = visuals.iter().rposition(|g| g == geometry) {
            visuals.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, TRANSPARENT};

    fn segment(x: f64) -> Geometry {
        Geometry {
            path: Path::Segment {
                start: Point::new(0.0, 0.0),
                end: Point::new(x, 5.0),
            },
            stroke: BLACK,
            fill: TRANSPARENT,
            stroke_width: 1.0,
            dashed: false,
        }
    }

    #[test]
    fn recording_surface_clones_share_visuals() {
        let observer = RecordingSurface::new();
        let mut surface = observer.clone();
        surface.add_visual(&segment(1.0));
        surface.add_visual(&segment(2.0).into_preview());
        assert_eq!(observer.len(), 2);
        assert_eq!(observer.preview_count(), 1);

        surface.remove_visual(&segment(1.0));
        assert_eq!(observer.visuals(), vec![segment(2.0).into_preview()]);
    }

    #[test]
    fn segment_bounds_are_normalized() {
        let path = Path::Segment {
            start: Point::new(10.0, 10.0),
            end: Point::new(4.0, 2.0),
        };
        assert_eq!(path.bounds(), Some(Rect::new(4.0, 2.0, 6.0, 8.0)));
    }
}
