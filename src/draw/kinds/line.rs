use crate::draw::geometry::{Geometry, Path};
use crate::draw::shape::{Shape, Style, mismatched_geometry};
use crate::error::{DrawError, Result};
use crate::util::{Point, Rect};

/// Straight segment stored as explicit endpoints.
///
/// The endpoints double as the shape's two vertices, so the bounding box is
/// always the normalized box between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    style: Style,
    ends: [Point; 2],
}

impl Line {
    pub fn new(start: Point, end: Point, style: Style) -> Self {
        Self {
            style,
            ends: [start, end],
        }
    }

    pub fn start(&self) -> Point {
        self.ends[0]
    }

    pub fn end(&self) -> Point {
        self.ends[1]
    }
}

impl Shape for Line {
    fn kind(&self) -> &str {
        super::LINE
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn bounds(&self) -> Rect {
        Rect::from_corners(self.ends[0], self.ends[1])
    }

    /// Reads a box as "start at the anchor, end at anchor + extent".
    ///
    /// Only reached for records written before segments carried endpoints; a
    /// later `set_vertices` overrides it.
    fn set_bounds(&mut self, bounds: Rect) {
        self.ends = [
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.x + bounds.width, bounds.y + bounds.height),
        ];
    }

    fn vertices(&self) -> &[Point] {
        &self.ends
    }

    fn set_vertices(&mut self, vertices: Vec<Point>) -> Result<()> {
        match vertices.as_slice() {
            [start, end] => {
                self.ends = [*start, *end];
                Ok(())
            }
            other => Err(DrawError::InvalidAttribute(format!(
                "a line needs exactly 2 endpoints, got {}",
                other.len()
            ))),
        }
    }

    fn materialize(&self) -> Geometry {
        self.style.paint(Path::Segment {
            start: self.ends[0],
            end: self.ends[1],
        })
    }

    fn sync_from_renderable(&mut self, geometry: &Geometry) -> Result<()> {
        match &geometry.path {
            Path::Segment { start, end } => {
                self.ends = [*start, *end];
                Ok(())
            }
            _ => Err(mismatched_geometry(self.kind(), geometry)),
        }
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn drag(&mut self, anchor: Point, current: Point) {
        self.ends = [anchor, current];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_keeps_direction_and_normalizes_bounds() {
        let mut line = Line::default();
        line.drag(Point::new(50.0, 40.0), Point::new(10.0, 60.0));
        assert_eq!(line.start(), Point::new(50.0, 40.0));
        assert_eq!(line.end(), Point::new(10.0, 60.0));
        assert_eq!(line.bounds(), Rect::new(10.0, 40.0, 40.0, 20.0));
    }

    #[test]
    fn legacy_bounds_layout_is_start_plus_offset() {
        let mut line = Line::default();
        line.set_bounds(Rect::new(5.0, 5.0, -5.0, 10.0));
        assert_eq!(line.start(), Point::new(5.0, 5.0));
        assert_eq!(line.end(), Point::new(0.0, 15.0));
        assert!(line.bounds().is_valid());
    }

    #[test]
    fn endpoints_must_come_in_pairs() {
        let mut line = Line::default();
        assert!(line.set_vertices(vec![Point::new(1.0, 1.0)]).is_err());
        assert!(
            line.set_vertices(vec![Point::new(1.0, 1.0), Point::new(2.0, 3.0)])
                .is_ok()
        );
        assert_eq!(line.bounds(), Rect::new(1.0, 1.0, 1.0, 2.0));
    }

    #[test]
    fn round_trips_through_renderable() {
        let line = Line::new(Point::new(3.0, 4.0), Point::new(-1.0, 8.0), Style::default());
        let mut copy = Line::default();
        copy.sync_from_renderable(&line.materialize()).unwrap();
        assert_eq!(copy, line);
    }
}
