//! Kinds whose whole geometry is a normalized bounding box.

use crate::draw::geometry::{Geometry, Path};
use crate::draw::shape::{Shape, Style, mismatched_geometry};
use crate::error::Result;
use crate::util::{self, Point, Rect};

/// Axis-aligned rectangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rectangle {
    style: Style,
    bounds: Rect,
}

impl Rectangle {
    pub fn new(bounds: Rect, style: Style) -> Self {
        Self {
            style,
            bounds: bounds.normalized(),
        }
    }
}

/// Ellipse inscribed in its bounding box.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ellipse {
    style: Style,
    bounds: Rect,
}

impl Ellipse {
    pub fn new(bounds: Rect, style: Style) -> Self {
        Self {
            style,
            bounds: bounds.normalized(),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.bounds.x + self.bounds.width / 2.0,
            self.bounds.y + self.bounds.height / 2.0,
        )
    }

    /// Horizontal and vertical radii.
    pub fn radii(&self) -> (f64, f64) {
        (self.bounds.width / 2.0, self.bounds.height / 2.0)
    }
}

// A box shape given vertices takes their bounding box and keeps no vertices.
fn box_from_vertices(vertices: &[Point]) -> Option<Rect> {
    util::bounding_box(vertices)
}

impl Shape for Rectangle {
    fn kind(&self) -> &str {
        super::RECTANGLE
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds.normalized();
    }

    fn vertices(&self) -> &[Point] {
        &[]
    }

    fn set_vertices(&mut self, vertices: Vec<Point>) -> Result<()> {
        if let Some(bounds) = box_from_vertices(&vertices) {
            self.bounds = bounds;
        }
        Ok(())
    }

    fn materialize(&self) -> Geometry {
        self.style.paint(Path::Rectangle(self.bounds))
    }

    fn sync_from_renderable(&mut self, geometry: &Geometry) -> Result<()> {
        match &geometry.path {
            Path::Rectangle(rect) => {
                self.bounds = rect.normalized();
                Ok(())
            }
            _ => Err(mismatched_geometry(self.kind(), geometry)),
        }
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

impl Shape for Ellipse {
    fn kind(&self) -> &str {
        super::ELLIPSE
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds.normalized();
    }

    fn vertices(&self) -> &[Point] {
        &[]
    }

    fn set_vertices(&mut self, vertices: Vec<Point>) -> Result<()> {
        if let Some(bounds) = box_from_vertices(&vertices) {
            self.bounds = bounds;
        }
        Ok(())
    }

    fn materialize(&self) -> Geometry {
        self.style.paint(Path::Ellipse(self.bounds))
    }

    fn sync_from_renderable(&mut self, geometry: &Geometry) -> Result<()> {
        match &geometry.path {
            Path::Ellipse(rect) => {
                self.bounds = rect.normalized();
                Ok(())
            }
            _ => Err(mismatched_geometry(self.kind(), geometry)),
        }
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    #[test]
    fn rectangle_drag_normalizes_in_every_direction() {
        let mut rect = Rectangle::default();
        rect.drag(Point::new(60.0, 40.0), Point::new(10.0, 10.0));
        assert_eq!(rect.bounds(), Rect::new(10.0, 10.0, 50.0, 30.0));
        assert!(rect.vertices().is_empty());
    }

    #[test]
    fn ellipse_reports_center_and_radii() {
        let ellipse = Ellipse::new(Rect::new(0.0, 0.0, 10.0, 4.0), Style::default());
        assert_eq!(ellipse.center(), Point::new(5.0, 2.0));
        assert_eq!(ellipse.radii(), (5.0, 2.0));
    }

    #[test]
    fn box_kinds_round_trip_through_renderable() {
        let style = Style::new(RED, BLUE, 2.0).unwrap();
        let rect = Rectangle::new(Rect::new(10.0, 10.0, 50.0, 30.0), style);
        let mut rect_copy = Rectangle::default();
        rect_copy.sync_from_renderable(&rect.materialize()).unwrap();
        assert_eq!(rect_copy.bounds(), rect.bounds());

        let ellipse = Ellipse::new(Rect::new(1.5, 2.5, 7.25, 3.0), style);
        let mut ellipse_copy = ellipse.clone();
        ellipse_copy
            .sync_from_renderable(&ellipse.materialize())
            .unwrap();
        assert_eq!(ellipse_copy, ellipse);
    }

    #[test]
    fn rectangle_rejects_ellipse_geometry() {
        let ellipse = Ellipse::default();
        let mut rect = Rectangle::default();
        assert!(rect.sync_from_renderable(&ellipse.materialize()).is_err());
    }

    #[test]
    fn vertices_collapse_into_bounds() {
        let mut rect = Rectangle::default();
        rect.set_vertices(vec![Point::new(4.0, 9.0), Point::new(1.0, 2.0)])
            .unwrap();
        assert_eq!(rect.bounds(), Rect::new(1.0, 2.0, 3.0, 7.0));
        assert!(rect.vertices().is_empty());
    }
}
