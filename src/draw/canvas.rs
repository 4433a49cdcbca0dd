//! Shape collection bound to a render surface.

use super::geometry::{Geometry, NullSurface, RenderSurface};
use super::shape::Shape;
use std::fmt;
use std::rc::Rc;

/// Ordered shape collection; insertion order is paint order.
///
/// Every mutation is mirrored on the bound [`RenderSurface`]: shapes added to
/// the collection are materialized and added as visuals, removed shapes have
/// their visuals removed. A single preview slot holds the geometry of the shape
/// currently being drawn, drawn above everything else.
pub struct Canvas {
    shapes: Vec<Rc<dyn Shape>>,
    surface: Box<dyn RenderSurface>,
    preview: Option<Geometry>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Box::new(NullSurface))
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("shapes", &self.shapes)
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    pub fn new(surface: Box<dyn RenderSurface>) -> Self {
        Self {
            shapes: Vec::new(),
            surface,
            preview: None,
        }
    }

    pub fn shapes(&self) -> &[Rc<dyn Shape>] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<dyn Shape>> {
        self.shapes.get(index)
    }

    pub fn last(&self) -> Option<&Rc<dyn Shape>> {
        self.shapes.last()
    }

    /// Adds a shape on top.
    pub fn push(&mut self, shape: Rc<dyn Shape>) {
        self.surface.add_visual(&shape.materialize());
        self.shapes.push(shape);
    }

    /// Inserts a shape at `index`, clamped to the end of the collection.
    ///
    /// The surface only supports appending, so visuals above the insertion
    /// point are removed and re-added to keep paint order.
    pub fn insert(&mut self, index: usize, shape: Rc<dyn Shape>) {
        let index = index.min(self.shapes.len());
        let above: Vec<Geometry> = self.shapes[index..]
            .iter()
            .map(|s| s.materialize())
            .collect();
        for geometry in above.iter().rev() {
            self.surface.remove_visual(geometry);
        }
        self.surface.add_visual(&shape.materialize());
        for geometry in &above {
            self.surface.add_visual(geometry);
        }
        self.shapes.insert(index, shape);
        self.restack_preview();
    }

    /// Removes the shape at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Rc<dyn Shape>> {
        if index >= self.shapes.len() {
            return None;
        }
        let shape = self.shapes.remove(index);
        self.surface.remove_visual(&shape.materialize());
        Some(shape)
    }

    /// Removes the top shape.
    pub fn pop(&mut self) -> Option<Rc<dyn Shape>> {
        let shape = self.shapes.pop()?;
        self.surface.remove_visual(&shape.materialize());
        Some(shape)
    }

    /// Position of this exact shape instance, compared by pointer.
    pub fn position_of(&self, shape: &Rc<dyn Shape>) -> Option<usize> {
        self.shapes.iter().rposition(|s| Rc::ptr_eq(s, shape))
    }

    /// Replaces the whole collection, as a load does.
    pub fn replace_all(&mut self, shapes: Vec<Rc<dyn Shape>>) {
        self.clear();
        for shape in shapes {
            self.push(shape);
        }
    }

    /// Removes every shape (the preview slot is left alone).
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    pub fn preview(&self) -> Option<&Geometry> {
        self.preview.as_ref()
    }

    /// Swaps the preview visual. `None` takes the current preview down.
    pub fn show_preview(&mut self, preview: Option<Geometry>) {
        if let Some(old) = self.preview.take() {
            self.surface.remove_visual(&old);
        }
        if let Some(new) = preview {
            self.surface.add_visual(&new);
            self.preview = Some(new);
        }
    }

    fn restack_preview(&mut self) {
        if let Some(preview) = &self.preview {
            self.surface.remove_visual(preview);
            self.surface.add_visual(preview);
        }
    }
}
