use crate::draw::geometry::{Geometry, Path};
use crate::draw::kinds::VertexOutline;
use crate::draw::shape::{Shape, Style, mismatched_geometry};
use crate::error::{DrawError, Result};
use crate::util::{Point, Rect};

pub const NAME: &str = "Trapezoid";

/// Isosceles trapezoid drawn with a single drag.
///
/// The anchor sits in the middle of the base. The horizontal drag distance is
/// the base half-width, the top is half as wide, and the vertical distance is
/// the height above the base.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trapezoid {
    style: Style,
    outline: VertexOutline,
}

impl Trapezoid {
    pub fn new(anchor: Point, current: Point, style: Style) -> Self {
        let mut shape = Self {
            style,
            outline: VertexOutline::default(),
        };
        shape.drag(anchor, current);
        shape
    }
}

fn corners(anchor: Point, current: Point) -> Vec<Point> {
    let half_base = (current.x - anchor.x).abs();
    let half_top = half_base / 2.0;
    let height = (anchor.y - current.y).abs();
    vec![
        Point::new(anchor.x - half_base, anchor.y),
        Point::new(anchor.x + half_base, anchor.y),
        Point::new(anchor.x + half_top, anchor.y - height),
        Point::new(anchor.x - half_top, anchor.y - height),
    ]
}

impl Shape for Trapezoid {
    fn kind(&self) -> &str {
        NAME
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
        if !vertices.is_empty() && vertices.len() != 4 {
            return Err(DrawError::InvalidAttribute(format!(
                "a trapezoid has 4 corners, got {}",
                vertices.len()
            )));
        }
        self.outline.set_vertices(vertices);
        Ok(())
    }

    fn materialize(&self) -> Geometry {
        self.style
            .paint(Path::Polygon(self.outline.vertices().to_vec()))
    }

    fn sync_from_renderable(&mut self, geometry: &Geometry) -> Result<()> {
        match &geometry.path {
            Path::Polygon(points) => self.set_vertices(points.clone()),
            _ => Err(mismatched_geometry(self.kind(), geometry)),
        }
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn drag(&mut self, anchor: Point, current: Point) {
        self.outline.set_vertices(corners(anchor, current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Draft, Phase};

    #[test]
    fn corners_follow_the_drag() {
        let shape = Trapezoid::new(Point::new(50.0, 50.0), Point::new(70.0, 30.0), Style::default());
        assert_eq!(
            shape.vertices(),
            &[
                Point::new(30.0, 50.0),
                Point::new(70.0, 50.0),
                Point::new(60.0, 30.0),
                Point::new(40.0, 30.0),
            ]
        );
        assert_eq!(shape.bounds(), Rect::new(30.0, 30.0, 40.0, 20.0));
    }

    #[test]
    fn drawn_with_a_single_gesture() {
        let mut draft = Draft::new(Box::new(Trapezoid::default()));
        draft.begin(Point::new(0.0, 10.0)).unwrap();
        draft.update(Point::new(4.0, 2.0)).unwrap();
        assert!(draft.complete(Point::new(8.0, 0.0)).unwrap());
        assert_eq!(draft.phase(), Phase::Finished);
        assert_eq!(draft.shape().bounds(), Rect::new(-8.0, 0.0, 16.0, 10.0));
    }

    #[test]
    fn round_trips_through_renderable() {
        let shape = Trapezoid::new(Point::new(5.0, 5.0), Point::new(9.0, 1.0), Style::default());
        let mut copy = Trapezoid::default();
        copy.sync_from_renderable(&shape.materialize()).unwrap();
        assert_eq!(copy, shape);
    }
}
