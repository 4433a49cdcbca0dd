use crate::draw::{Draft, DrawingMode};
use crate::error::Result;
use crate::input::events::MouseButton;
use log::debug;

use super::InputState;

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Arguments
    /// * `button` - Which mouse button was pressed
    /// * `x` - Mouse X coordinate
    /// * `y` - Mouse Y coordinate
    ///
    /// # Behavior
    /// - Left click while idle: starts a shape of the current kind
    /// - Left click while drawing a multi-click shape: commits a vertex
    /// - Right click while drawing a multi-click shape: finishes it if it has
    ///   enough vertices
    /// - Right click while dragging: abandons the shape
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) -> Result<()> {
        let point = self.clamp_point(x, y)?;
        match button {
            MouseButton::Left => {
                if let Some(draft) = &mut self.draft {
                    if !draft.mode().is_multi_step() {
                        debug!("Ignoring press while a drag is in progress");
                        return Ok(());
                    }
                    draft.commit_point(point)?;
                } else {
                    let mut draft = Draft::new(self.new_shape()?);
                    draft.begin(point)?;
                    self.draft = Some(draft);
                }
                self.sync_preview();
            }
            MouseButton::Right => match self.draft.as_ref().map(Draft::mode) {
                Some(DrawingMode::Click { .. }) => {
                    self.finish_draft()?;
                }
                Some(DrawingMode::Drag) => {
                    self.abandon_draft();
                }
                None => {}
            },
            MouseButton::Middle => {}
        }
        Ok(())
    }

    /// Processes mouse motion events.
    ///
    /// While a shape is being drawn the preview follows the pointer.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) -> Result<()> {
        let point = self.clamp_point(x, y)?;
        if let Some(draft) = &mut self.draft {
            draft.update(point)?;
            self.sync_preview();
        }
        Ok(())
    }

    /// Processes mouse button release events.
    ///
    /// Releasing the left button completes a drag shape and adds it to the
    /// canvas. Multi-click shapes ignore releases.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: f64, y: f64) -> Result<()> {
        if button != MouseButton::Left {
            return Ok(());
        }
        let point = self.clamp_point(x, y)?;
        if let Some(draft) = &mut self.draft {
            if draft.mode() == DrawingMode::Drag && draft.complete(point)? {
                self.commit_draft()?;
            }
        }
        Ok(())
    }

    /// Finishes a multi-click shape. Returns whether it was added to the canvas.
    pub fn finish_draft(&mut self) -> Result<bool> {
        let Some(draft) = &mut self.draft else {
            return Ok(false);
        };
        if !draft.mode().is_multi_step() {
            return Ok(false);
        }
        if draft.finish()? {
            self.commit_draft()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
