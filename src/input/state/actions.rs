use crate::draw::Shape;
use crate::error::Result;
use crate::history::RemoveShape;
use crate::input::events::Key;
use crate::session::{self, SavedDrawing, StorageOptions};
use log::{debug, info, warn};
use std::path::Path;
use std::rc::Rc;

use super::InputState;

/// Editor commands reachable from the keyboard or from a host menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Undo the last executed command
    Undo,
    /// Re-apply the last undone command
    Redo,
    /// Abandon the shape being drawn
    Cancel,
    /// Finish the multi-click shape being drawn
    Finish,
    /// Remove the topmost shape (undoable)
    DeleteLast,
    /// Start a new, empty drawing (drops history)
    Clear,
}

/// Outcome of replacing the drawing with a file's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Shapes now on the canvas
    pub shapes: usize,
    /// Records that could not be restored
    pub skipped: usize,
    /// Shapes dropped by the shape limit
    pub truncated: usize,
}

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles:
    /// - Modifier key tracking
    /// - Escape: abandon the shape being drawn
    /// - Return: finish a multi-click shape
    /// - Delete: remove the topmost shape
    /// - Ctrl+Z: undo, Ctrl+Y or Ctrl+Shift+Z: redo
    /// - Ctrl+N: new drawing
    pub fn on_key_press(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return Ok(());
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return Ok(());
            }
            _ => {}
        }

        if let Some(action) = self.find_action(key) {
            self.handle_action(action)?;
        }
        Ok(())
    }

    /// Processes a key release event.
    ///
    /// Currently only tracks modifier key releases to update the modifier state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            _ => {}
        }
    }

    fn find_action(&self, key: Key) -> Option<Action> {
        let ctrl = self.modifiers.ctrl;
        let shift = self.modifiers.shift;
        match key {
            Key::Escape => Some(Action::Cancel),
            Key::Return => Some(Action::Finish),
            Key::Delete => Some(Action::DeleteLast),
            Key::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'z' if shift => Some(Action::Redo),
                'z' => Some(Action::Undo),
                'y' => Some(Action::Redo),
                'n' => Some(Action::Clear),
                _ => None,
            },
            _ => None,
        }
    }

    /// Runs an editor action.
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        debug!("Handling action {:?}", action);
        match action {
            Action::Undo => {
                self.undo()?;
            }
            Action::Redo => {
                self.redo()?;
            }
            Action::Cancel => {
                self.abandon_draft();
            }
            Action::Finish => {
                self.finish_draft()?;
            }
            Action::DeleteLast => {
                self.delete_last()?;
            }
            Action::Clear => {
                self.clear();
            }
        }
        Ok(())
    }

    /// Undoes the last command. A shape still being drawn is abandoned first.
    ///
    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        self.abandon_draft();
        let undone = self.history.undo(&mut self.canvas)?;
        if undone {
            self.needs_redraw = true;
        }
        Ok(undone)
    }

    /// Re-applies the last undone command. A shape still being drawn is
    /// abandoned first.
    pub fn redo(&mut self) -> Result<bool> {
        self.abandon_draft();
        let redone = self.history.redo(&mut self.canvas)?;
        if redone {
            self.needs_redraw = true;
        }
        Ok(redone)
    }

    /// Removes the topmost shape as an undoable step.
    pub fn delete_last(&mut self) -> Result<bool> {
        let Some(index) = self.canvas.len().checked_sub(1) else {
            return Ok(false);
        };
        let command = RemoveShape::at(&self.canvas, index)?;
        self.history.execute(Box::new(command), &mut self.canvas)?;
        self.needs_redraw = true;
        Ok(true)
    }

    /// Starts a new, empty drawing. History is dropped with the old shapes.
    pub fn clear(&mut self) {
        self.abandon_draft();
        self.canvas.clear();
        self.history.clear_all();
        self.needs_redraw = true;
        info!("Started a new drawing");
    }

    /// Saves the committed shapes to `path`. A shape still being drawn is not
    /// included.
    pub fn save_to(&self, path: &Path, options: &StorageOptions) -> Result<SavedDrawing> {
        session::save_drawing(
            path,
            self.canvas.shapes().iter().map(|shape| &**shape),
            options,
        )
    }

    /// Replaces the drawing with the contents of `path`.
    ///
    /// The undo history is cleared since it no longer matches the shapes. On
    /// error the current drawing is left untouched.
    pub fn load_from(&mut self, path: &Path, options: &StorageOptions) -> Result<LoadSummary> {
        let loaded = session::load_drawing(path, &self.registry, options)?;
        if loaded.skipped > 0 {
            warn!(
                "{} record(s) in {} could not be restored",
                loaded.skipped,
                path.display()
            );
        }

        self.abandon_draft();
        let shapes: Vec<Rc<dyn Shape>> = loaded.shapes.into_iter().map(Rc::from).collect();
        let summary = LoadSummary {
            shapes: shapes.len(),
            skipped: loaded.skipped,
            truncated: loaded.truncated,
        };
        self.canvas.replace_all(shapes);
        self.history.clear_all();
        self.needs_redraw = true;
        Ok(summary)
    }
}
