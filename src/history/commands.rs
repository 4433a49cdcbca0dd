//! Shape collection commands.

use super::Command;
use crate::draw::{Canvas, Shape};
use crate::error::{DrawError, Result};
use std::rc::Rc;

/// Appends a shape on top of the canvas.
#[derive(Debug, Clone)]
pub struct AddShape {
    shape: Rc<dyn Shape>,
}

impl AddShape {
    pub fn new(shape: Rc<dyn Shape>) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> &Rc<dyn Shape> {
        &self.shape
    }
}

impl Command<Canvas> for AddShape {
    fn apply(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.push(Rc::clone(&self.shape));
        Ok(())
    }

    fn revert(&self, canvas: &mut Canvas) -> Result<()> {
        match canvas.last() {
            Some(top) if Rc::ptr_eq(top, &self.shape) => {
                canvas.pop();
                Ok(())
            }
            _ => Err(not_on_canvas("undo add")),
        }
    }

    fn label(&self) -> String {
        format!("add {}", self.shape.kind())
    }
}

/// Removes the shape at a position; undo puts it back at the same position.
#[derive(Debug, Clone)]
pub struct RemoveShape {
    index: usize,
    shape: Rc<dyn Shape>,
}

impl RemoveShape {
    /// Captures the shape currently at `index`.
    pub fn at(canvas: &Canvas, index: usize) -> Result<Self> {
        let shape = canvas.get(index).cloned().ok_or_else(|| {
            DrawError::InvalidAttribute(format!(
                "no shape at index {index} (canvas holds {})",
                canvas.len()
            ))
        })?;
        Ok(Self { index, shape })
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl Command<Canvas> for RemoveShape {
    fn apply(&self, canvas: &mut Canvas) -> Result<()> {
        match canvas.get(self.index) {
            Some(current) if Rc::ptr_eq(current, &self.shape) => {
                canvas.remove(self.index);
                Ok(())
            }
            _ => Err(not_on_canvas("remove")),
        }
    }

    fn revert(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.insert(self.index, Rc::clone(&self.shape));
        Ok(())
    }

    fn label(&self) -> String {
        format!("remove {}", self.shape.kind())
    }
}

fn not_on_canvas(operation: &'static str) -> DrawError {
    DrawError::InvalidState {
        operation,
        state: "the shape is not where the command left it",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Ellipse, Polygon, RecordingSurface, Rectangle, Style};
    use crate::history::History;
    use crate::util::{Point, Rect};

    fn shapes() -> Vec<Rc<dyn Shape>> {
        vec![
            Rc::new(Rectangle::new(Rect::new(10.0, 10.0, 50.0, 30.0), Style::default())),
            Rc::new(Ellipse::new(Rect::new(0.0, 0.0, 4.0, 4.0), Style::default())),
            Rc::new(Polygon::new(
                vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)],
                Style::default(),
            )),
        ]
    }

    #[test]
    fn add_shape_round_trip_through_history() {
        let surface = RecordingSurface::new();
        let mut canvas = Canvas::new(Box::new(surface.clone()));
        let mut history = History::new();
        for shape in shapes() {
            history
                .execute(Box::new(AddShape::new(shape)), &mut canvas)
                .unwrap();
        }
        assert_eq!(canvas.len(), 3);
        assert_eq!(surface.len(), 3);

        while history.undo(&mut canvas).unwrap() {}
        assert!(canvas.is_empty());
        assert!(surface.is_empty());

        while history.redo(&mut canvas).unwrap() {}
        let kinds: Vec<&str> = canvas.shapes().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["Rectangle", "Ellipse", "Polygon"]);
    }

    #[test]
    fn remove_shape_restores_position_on_undo() {
        let mut canvas = Canvas::default();
        for shape in shapes() {
            canvas.push(shape);
        }
        let mut history = History::new();
        let remove = RemoveShape::at(&canvas, 1).unwrap();
        history.execute(Box::new(remove), &mut canvas).unwrap();
        assert_eq!(canvas.len(), 2);
        assert_eq!(canvas.shapes()[1].kind(), "Polygon");

        history.undo(&mut canvas).unwrap();
        assert_eq!(canvas.shapes()[1].kind(), "Ellipse");
        assert_eq!(canvas.len(), 3);
    }

    #[test]
    fn remove_shape_rejects_bad_index() {
        let canvas = Canvas::default();
        assert!(RemoveShape::at(&canvas, 0).is_err());
    }

    #[test]
    fn undo_add_refuses_when_shape_was_replaced() {
        let mut canvas = Canvas::default();
        let mut history = History::new();
        let [first, second, _] = <[Rc<dyn Shape>; 3]>::try_from(shapes()).unwrap();
        history
            .execute(Box::new(AddShape::new(first)), &mut canvas)
            .unwrap();
        canvas.replace_all(vec![second]);

        assert!(history.undo(&mut canvas).is_err());
        assert!(history.can_undo());
        assert_eq!(canvas.len(), 1);
    }
}
