//! Vertex-based kinds drawn one click at a time.

use crate::draw::geometry::{Geometry, Path};
use crate::draw::shape::{DrawingMode, Shape, Style, mismatched_geometry};
use crate::error::Result;
use crate::util::{self, Point, Rect};

/// Ordered vertex list with bounds derived from it.
///
/// Shared storage for kinds whose outline is a sequence of points. While the
/// list is non-empty the bounds always equal the vertices' bounding box, and
/// explicit `set_bounds` calls are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexOutline {
    vertices: Vec<Point>,
    bounds: Rect,
}

impl VertexOutline {
    pub fn new(vertices: Vec<Point>) -> Self {
        let mut outline = Self::default();
        outline.set_vertices(vertices);
        outline
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replaces the vertex list. An empty list also resets the bounds.
    pub fn set_vertices(&mut self, vertices: Vec<Point>) {
        self.bounds = util::bounding_box(&vertices).unwrap_or_default();
        self.vertices = vertices;
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.vertices.is_empty() {
            self.bounds = bounds.normalized();
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Closed outline through three or more vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    style: Style,
    outline: VertexOutline,
}

impl Polygon {
    pub const MIN_VERTICES: usize = 3;

    pub fn new(vertices: Vec<Point>, style: Style) -> Self {
        Self {
            style,
            outline: VertexOutline::new(vertices),
        }
    }
}

/// Open outline through two or more vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    style: Style,
    outline: VertexOutline,
}

impl Polyline {
    pub const MIN_VERTICES: usize = 2;

    pub fn new(vertices: Vec<Point>, style: Style) -> Self {
        Self {
            style,
            outline: VertexOutline::new(vertices),
        }
    }
}

macro_rules! vertex_shape {
    ($ty:ident, $kind:expr, $path:ident) => {
        impl Shape for $ty {
            fn kind(&self) -> &str {
                $kind
            }

            fn style(&self) -> &Style {
                &self.style
            }

            fn style_mut(&mut self) -> &mut Style {
                &mut self.style
            }

            fn bounds(&self) -> Rect {
                self.outline.bounds()
            }

            fn set_bounds(&mut self, bounds: Rect) {
                self.outline.set_bounds(bounds);
            }

            fn vertices(&self) -> &[Point] {
                self.outline.vertices()
            }

            fn set_vertices(&mut self, vertices: Vec<Point>) -> Result<()> {
                self.outline.set_vertices(vertices);
                Ok(())
            }

            fn materialize(&self) -> Geometry {
                self.style
                    .paint(Path::$path(self.outline.vertices().to_vec()))
            }

            fn sync_from_renderable(&mut self, geometry: &Geometry) -> Result<()> {
                match &geometry.path {
                    Path::$path(points) => {
                        self.outline.set_vertices(points.clone());
                        Ok(())
                    }
                    _ => Err(mismatched_geometry(self.kind(), geometry)),
                }
            }

            fn clone_box(&self) -> Box<dyn Shape> {
                Box::new(self.clone())
            }

            fn drawing_mode(&self) -> DrawingMode {
                DrawingMode::Click {
                    min_vertices: $ty::MIN_VERTICES,
                }
            }
        }
    };
}

vertex_shape!(Polygon, super::POLYGON, Polygon);
vertex_shape!(Polyline, super::POLYLINE, Polyline);

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ]
    }

    #[test]
    fn bounds_follow_vertices() {
        let polygon = Polygon::new(triangle(), Style::default());
        assert_eq!(polygon.bounds(), Rect::new(0.0, 0.0, 10.0, 8.0));
        assert_eq!(polygon.vertices().len(), 3);
    }

    #[test]
    fn explicit_bounds_ignored_while_vertices_exist() {
        let mut polygon = Polygon::new(triangle(), Style::default());
        polygon.set_bounds(Rect::new(100.0, 100.0, 1.0, 1.0));
        assert_eq!(polygon.bounds(), Rect::new(0.0, 0.0, 10.0, 8.0));

        let mut empty = Polyline::default();
        empty.set_bounds(Rect::new(3.0, 3.0, -2.0, 2.0));
        assert_eq!(empty.bounds(), Rect::new(1.0, 3.0, 2.0, 2.0));
    }

    #[test]
    fn clearing_vertices_resets_bounds() {
        let mut polygon = Polygon::new(triangle(), Style::default());
        polygon.set_vertices(Vec::new());
        assert!(polygon.vertices().is_empty());
        assert_eq!(polygon.bounds(), Rect::default());

        polygon.set_bounds(Rect::new(2.0, 2.0, 4.0, 4.0));
        assert_eq!(polygon.bounds(), Rect::new(2.0, 2.0, 4.0, 4.0));
    }

    #[test]
    fn click_modes_carry_minimum_vertex_counts() {
        assert_eq!(
            Polygon::default().drawing_mode(),
            DrawingMode::Click { min_vertices: 3 }
        );
        assert_eq!(
            Polyline::default().drawing_mode(),
            DrawingMode::Click { min_vertices: 2 }
        );
    }

    #[test]
    fn polyline_round_trips_through_renderable() {
        let polyline = Polyline::new(
            vec![Point::new(1.0, 2.0), Point::new(-3.0, 4.5)],
            Style::default(),
        );
        let geometry = polyline.materialize();
        let mut copy = Polyline::default();
        copy.sync_from_renderable(&geometry).unwrap();
        assert_eq!(copy, polyline);
        assert_eq!(copy.materialize(), geometry);
    }

    #[test]
    fn polygon_rejects_polyline_geometry() {
        let polyline = Polyline::new(triangle(), Style::default());
        let mut polygon = Polygon::default();
        assert!(polygon.sync_from_renderable(&polyline.materialize()).is_err());
    }
}
