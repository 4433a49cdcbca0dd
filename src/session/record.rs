//! Flat record format for persisted shapes.
//!
//! One [`ShapeRecord`] per shape, in paint order. Field names are part of the
//! file format and must not change:
//!
//! ```json
//! {
//!   "TypeName": "Polygon",
//!   "StrokeColor": "#FF000000",
//!   "FillColor": "#00FFFFFF",
//!   "StrokeThickness": 1.0,
//!   "BoundsX": 0.0, "BoundsY": 0.0, "BoundsWidth": 10.0, "BoundsHeight": 10.0,
//!   "Points": [{ "X": 0.0, "Y": 0.0 }, { "X": 10.0, "Y": 0.0 }, { "X": 5.0, "Y": 10.0 }]
//! }
//! ```
//!
//! `Points` is left out entirely for shapes without vertices.

use crate::draw::color::{DEFAULT_FILL, DEFAULT_STROKE};
use crate::draw::{Color, Shape, Style};
use crate::error::{DrawError, Result};
use crate::registry::ShapeRegistry;
use crate::util::{Point, Rect};
use log::warn;
use serde::{Deserialize, Serialize};

/// Persisted form of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShapeRecord {
    pub type_name: String,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: f64,
    #[serde(default)]
    pub bounds_x: f64,
    #[serde(default)]
    pub bounds_y: f64,
    #[serde(default)]
    pub bounds_width: f64,
    #[serde(default)]
    pub bounds_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<PointRecord>>,
}

/// Persisted vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for PointRecord {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        Point::new(record.x, record.y)
    }
}

fn default_stroke_color() -> String {
    DEFAULT_STROKE.to_hex()
}

fn default_fill_color() -> String {
    DEFAULT_FILL.to_hex()
}

fn default_stroke_thickness() -> f64 {
    1.0
}

impl ShapeRecord {
    /// Captures the persisted attributes of `shape`.
    pub fn from_shape(shape: &dyn Shape) -> Self {
        let bounds = shape.bounds();
        let vertices = shape.vertices();
        Self {
            type_name: shape.kind().to_string(),
            stroke_color: shape.stroke_color().to_hex(),
            fill_color: shape.fill_color().to_hex(),
            stroke_thickness: shape.stroke_width(),
            bounds_x: bounds.x,
            bounds_y: bounds.y,
            bounds_width: bounds.width,
            bounds_height: bounds.height,
            points: (!vertices.is_empty())
                .then(|| vertices.iter().copied().map(PointRecord::from).collect()),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.bounds_x,
            self.bounds_y,
            self.bounds_width,
            self.bounds_height,
        )
    }

    /// Rebuilds a live shape through the registry.
    ///
    /// Attributes are copied verbatim; when the record carries vertices they are
    /// applied last so the bounds are re-derived from them.
    pub fn restore(&self, registry: &ShapeRegistry) -> Result<Box<dyn Shape>> {
        let mut shape = registry.create(&self.type_name)?;
        let style = Style::new(
            Color::from_hex(&self.stroke_color)?,
            Color::from_hex(&self.fill_color)?,
            self.stroke_thickness,
        )?;
        shape.set_style(style)?;
        shape.set_bounds(self.bounds());
        if let Some(points) = self.points.as_deref().filter(|p| !p.is_empty()) {
            shape.set_vertices(points.iter().copied().map(Point::from).collect())?;
        }
        Ok(shape)
    }
}

/// Result of [`deserialize`].
#[derive(Debug, Default)]
pub struct Decoded {
    pub shapes: Vec<Box<dyn Shape>>,
    /// Records that could not be turned into shapes
    pub skipped: usize,
}

/// Converts shapes into records, preserving order.
pub fn serialize<'a>(shapes: impl IntoIterator<Item = &'a dyn Shape>) -> Vec<ShapeRecord> {
    shapes.into_iter().map(ShapeRecord::from_shape).collect()
}

/// Rebuilds shapes from records, skipping the ones that cannot be restored.
///
/// Unknown kinds and records with rejected attributes are counted in
/// [`Decoded::skipped`] instead of failing the whole batch.
pub fn deserialize(records: &[ShapeRecord], registry: &ShapeRegistry) -> Decoded {
    let mut decoded = Decoded::default();
    for (index, record) in records.iter().enumerate() {
        match record.restore(registry) {
            Ok(shape) => decoded.shapes.push(shape),
            Err(err @ DrawError::UnknownKind(_)) => {
                warn!("Skipping record {index}: {err}");
                decoded.skipped += 1;
            }
            Err(err) => {
                warn!(
                    "Skipping record {index} ({}): {err}",
                    record.type_name
                );
                decoded.skipped += 1;
            }
        }
    }
    decoded
}
