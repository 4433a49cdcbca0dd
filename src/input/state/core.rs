//! Editor session state.

use crate::config::Config;
use crate::draw::{Canvas, Draft, Phase, RenderSurface, Shape, Style};
use crate::error::{DrawError, Result};
use crate::history::{AddShape, History};
use crate::input::modifiers::Modifiers;
use crate::plugins;
use crate::registry::ShapeRegistry;
use crate::util::Point;
use log::{debug, info, warn};
use std::rc::Rc;

/// Main input state containing the whole editing session.
///
/// Holds the shape collection, its undo history, the registry used to create
/// new shapes, the attributes chosen for the next shape, and the draft of the
/// shape currently being drawn. Processes pointer and keyboard events and
/// reports whether the surface needs a redraw.
#[derive(Debug)]
pub struct InputState {
    /// Shapes on the drawing surface, in paint order
    pub canvas: Canvas,
    /// Undo/redo stacks over `canvas`
    pub history: History<Canvas>,
    /// Kind name → factory lookup (built-ins plus accepted plugins)
    pub registry: ShapeRegistry,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Drawing surface width in pixels
    pub screen_width: u32,
    /// Drawing surface height in pixels
    pub screen_height: u32,
    pub(super) current_kind: String,
    pub(super) current_style: Style,
    pub(super) draft: Option<Draft>,
}

impl InputState {
    /// Creates a session drawing `kind` shapes with `style`.
    ///
    /// # Errors
    /// Returns [`DrawError::UnknownKind`] if `kind` is not in `registry`.
    pub fn new(
        canvas: Canvas,
        registry: ShapeRegistry,
        history: History<Canvas>,
        kind: &str,
        style: Style,
    ) -> Result<Self> {
        if !registry.contains(kind) {
            return Err(DrawError::UnknownKind(kind.to_string()));
        }
        Ok(Self {
            canvas,
            history,
            registry,
            modifiers: Modifiers::new(),
            needs_redraw: true,
            screen_width: 0,
            screen_height: 0,
            current_kind: kind.to_string(),
            current_style: style,
            draft: None,
        })
    }

    /// Builds a session from configuration, painting onto `surface`.
    ///
    /// Enabled plugins are offered to the registry; an unknown `default_kind`
    /// falls back to `Rectangle` with a warning.
    pub fn from_config(config: &Config, surface: Box<dyn RenderSurface>) -> Self {
        let mut registry = ShapeRegistry::with_builtins();
        let report = registry.accept_plugins(plugins::load(&config.plugins.enabled));
        debug!(
            "Plugins: {} accepted, {} rejected",
            report.accepted, report.rejected
        );

        let mut kind = config.drawing.default_kind.clone();
        if !registry.contains(&kind) {
            warn!("Unknown default_kind '{kind}', falling back to 'Rectangle'");
            kind = crate::draw::kinds::RECTANGLE.to_string();
        }

        let mut state = Self {
            canvas: Canvas::new(surface),
            history: History::with_depth(config.history.max_undo),
            registry,
            modifiers: Modifiers::new(),
            needs_redraw: true,
            screen_width: 0,
            screen_height: 0,
            current_kind: kind,
            current_style: config.drawing.style(),
            draft: None,
        };
        state.update_screen_dimensions(config.canvas.width, config.canvas.height);
        state
    }

    /// Updates the drawing surface extent used for clamping pointer positions.
    pub fn update_screen_dimensions(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Clamps a pointer position into the drawing surface.
    ///
    /// Before the host reports an extent, positions pass through unchanged.
    /// Non-finite coordinates are rejected with `InvalidAttribute`.
    pub fn clamp_point(&self, x: f64, y: f64) -> Result<Point> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DrawError::InvalidAttribute(format!(
                "pointer position ({x}, {y}) is not finite"
            )));
        }
        let point = Point::new(x, y);
        if self.screen_width == 0 || self.screen_height == 0 {
            Ok(point)
        } else {
            Ok(point.clamped(self.screen_width as f64, self.screen_height as f64))
        }
    }

    pub fn current_kind(&self) -> &str {
        &self.current_kind
    }

    pub fn current_style(&self) -> Style {
        self.current_style
    }

    /// Selects the kind used for the next shape.
    ///
    /// Switching kinds abandons a shape that is still being drawn.
    pub fn set_kind(&mut self, kind: &str) -> Result<()> {
        if !self.registry.contains(kind) {
            return Err(DrawError::UnknownKind(kind.to_string()));
        }
        if self.current_kind != kind {
            self.abandon_draft();
            info!("Switched shape kind to {kind}");
            self.current_kind = kind.to_string();
        }
        Ok(())
    }

    /// Sets the paint attributes for the next shape.
    pub fn set_style(&mut self, style: Style) -> Result<()> {
        self.current_style = Style::new(style.stroke, style.fill, style.stroke_width)?;
        Ok(())
    }

    /// Phase of the shape being drawn, if any.
    pub fn draft_phase(&self) -> Option<Phase> {
        self.draft.as_ref().map(Draft::phase)
    }

    /// Whether a shape is currently being drawn.
    pub fn is_drawing(&self) -> bool {
        self.draft.is_some()
    }

    /// Creates a fresh shape of the current kind with the current paint attributes.
    pub(super) fn new_shape(&self) -> Result<Box<dyn Shape>> {
        let mut shape = self.registry.create(&self.current_kind)?;
        shape.set_style(self.current_style)?;
        Ok(shape)
    }

    /// Shows the draft's current preview on the surface.
    pub(super) fn sync_preview(&mut self) {
        let preview = self.draft.as_ref().and_then(|d| d.preview().cloned());
        self.canvas.show_preview(preview);
        self.needs_redraw = true;
    }

    /// Moves a finished draft into the collection as an undoable step.
    pub(super) fn commit_draft(&mut self) -> Result<()> {
        let Some(draft) = self.draft.take() else {
            return Ok(());
        };
        self.canvas.show_preview(None);
        let shape: Rc<dyn Shape> = Rc::from(draft.into_shape()?);
        debug!("Committing {} to canvas", shape.kind());
        self.history
            .execute(Box::new(AddShape::new(shape)), &mut self.canvas)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Drops the shape being drawn and takes its preview off the surface.
    pub fn abandon_draft(&mut self) -> bool {
        let Some(mut draft) = self.draft.take() else {
            return false;
        };
        draft.abandon();
        self.canvas.show_preview(None);
        self.needs_redraw = true;
        true
    }
}
