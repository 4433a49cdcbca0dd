//! Interactive drawing state machine.
//!
//! A [`Draft`] wraps one freshly created shape while the user draws it. Drag
//! kinds go `Idle → Started → Updating → Finished` in a single gesture; click
//! kinds loop through `Started`/`Updating` once per committed vertex until an
//! explicit finish succeeds. Every operation called in the wrong phase returns
//! [`DrawError::InvalidState`].
//!
//! Pointer coordinates are taken as-is. Clamping them to the drawing surface is
//! the caller's job.

use super::geometry::Geometry;
use super::shape::{DrawingMode, Shape};
use crate::error::{DrawError, Result};
use crate::util::Point;
use log::debug;

/// Lifecycle phase of a [`Draft`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first pointer press
    Idle,
    /// Anchor recorded, no provisional point shown
    Started,
    /// Live preview follows the pointer
    Updating,
    /// Shape is complete and can be taken out
    Finished,
    /// Drawing was cancelled; nothing will be committed
    Abandoned,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Started => "started",
            Phase::Updating => "updating",
            Phase::Finished => "finished",
            Phase::Abandoned => "abandoned",
        }
    }

    fn is_active(&self) -> bool {
        matches!(self, Phase::Started | Phase::Updating)
    }
}

/// A shape under construction plus its drawing protocol state.
#[derive(Debug)]
pub struct Draft {
    shape: Box<dyn Shape>,
    mode: DrawingMode,
    phase: Phase,
    anchor: Point,
    preview: Option<Geometry>,
}

impl Draft {
    /// Wraps a fresh shape whose paint attributes are already set.
    pub fn new(shape: Box<dyn Shape>) -> Self {
        let mode = shape.drawing_mode();
        Self {
            shape,
            mode,
            phase: Phase::Idle,
            anchor: Point::default(),
            preview: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    /// The preview geometry currently on screen, if any.
    pub fn preview(&self) -> Option<&Geometry> {
        self.preview.as_ref()
    }

    /// Number of committed vertices (click kinds) or vertices of the live drag.
    pub fn vertex_count(&self) -> usize {
        self.shape.vertices().len()
    }

    /// Records the anchor and returns the initial preview.
    pub fn begin(&mut self, point: Point) -> Result<Geometry> {
        self.expect_phase("begin", |phase| phase == Phase::Idle)?;
        self.anchor = point;
        match self.mode {
            DrawingMode::Drag => self.shape.drag(point, point),
            DrawingMode::Click { .. } => self.shape.set_vertices(vec![point])?,
        }
        self.phase = Phase::Started;
        debug!("{} draft started at ({}, {})", self.shape.kind(), point.x, point.y);
        Ok(self.refresh_preview(self.shape.materialize()))
    }

    /// Moves the live end of the shape to `point` and returns the new preview.
    ///
    /// Drag kinds commit the point to their geometry immediately. Click kinds
    /// only show it; the vertex list is untouched until [`Draft::commit_point`].
    pub fn update(&mut self, point: Point) -> Result<Geometry> {
        self.expect_phase("update", |phase| phase.is_active())?;
        let geometry = match self.mode {
            DrawingMode::Drag => {
                self.shape.drag(self.anchor, point);
                self.shape.materialize()
            }
            DrawingMode::Click { .. } => {
                let mut ghost = self.shape.clone_box();
                let mut vertices = self.shape.vertices().to_vec();
                vertices.push(point);
                ghost.set_vertices(vertices)?;
                ghost.materialize()
            }
        };
        self.phase = Phase::Updating;
        Ok(self.refresh_preview(geometry))
    }

    /// Appends a permanent vertex. Click kinds only.
    ///
    /// Always returns `false`: completing a click shape takes an explicit
    /// [`Draft::finish`].
    pub fn commit_point(&mut self, point: Point) -> Result<bool> {
        self.expect_phase("commit_point", |phase| phase.is_active())?;
        self.expect_multi_step("commit_point")?;
        let mut vertices = self.shape.vertices().to_vec();
        vertices.push(point);
        self.shape.set_vertices(vertices)?;
        self.phase = Phase::Started;
        self.refresh_preview(self.shape.materialize());
        debug!(
            "{} draft committed vertex {}",
            self.shape.kind(),
            self.vertex_count()
        );
        Ok(false)
    }

    /// Completes the shape at `point`.
    ///
    /// Drag kinds take `point` as the end of the gesture and always finish.
    /// Click kinds commit `point` as a vertex and then try to finish; the
    /// result says whether the minimum vertex count was reached.
    pub fn complete(&mut self, point: Point) -> Result<bool> {
        self.expect_phase("complete", |phase| phase.is_active())?;
        match self.mode {
            DrawingMode::Drag => {
                self.shape.drag(self.anchor, point);
                self.mark_finished();
                Ok(true)
            }
            DrawingMode::Click { .. } => {
                self.commit_point(point)?;
                self.finish()
            }
        }
    }

    /// Explicit finish for click kinds.
    ///
    /// Returns `true` and moves to [`Phase::Finished`] once enough vertices are
    /// committed; otherwise nothing changes and `false` is returned.
    pub fn finish(&mut self) -> Result<bool> {
        self.expect_phase("finish", |phase| phase.is_active())?;
        let DrawingMode::Click { min_vertices } = self.mode else {
            return Err(self.wrong_mode("finish"));
        };
        if self.vertex_count() < min_vertices {
            debug!(
                "{} draft needs {} vertices, has {}",
                self.shape.kind(),
                min_vertices,
                self.vertex_count()
            );
            return Ok(false);
        }
        self.mark_finished();
        Ok(true)
    }

    /// Cancels drawing from any phase.
    ///
    /// Returns the preview the host must take off the surface, if one was shown.
    pub fn abandon(&mut self) -> Option<Geometry> {
        if self.phase != Phase::Abandoned {
            debug!("{} draft abandoned in {}", self.shape.kind(), self.phase.name());
        }
        self.phase = Phase::Abandoned;
        self.preview.take()
    }

    /// Hands over the finished shape.
    pub fn into_shape(self) -> Result<Box<dyn Shape>> {
        if self.phase != Phase::Finished {
            return Err(DrawError::InvalidState {
                operation: "into_shape",
                state: self.phase.name(),
            });
        }
        Ok(self.shape)
    }

    fn mark_finished(&mut self) {
        self.phase = Phase::Finished;
        self.preview = None;
        debug!("{} draft finished", self.shape.kind());
    }

    fn refresh_preview(&mut self, geometry: Geometry) -> Geometry {
        let preview = geometry.into_preview();
        self.preview = Some(preview.clone());
        preview
    }

    fn expect_phase(&self, operation: &'static str, allowed: impl Fn(Phase) -> bool) -> Result<()> {
        if allowed(self.phase) {
            Ok(())
        } else {
            Err(DrawError::InvalidState {
                operation,
                state: self.phase.name(),
            })
        }
    }

    fn expect_multi_step(&self, operation: &'static str) -> Result<()> {
        if self.mode.is_multi_step() {
            Ok(())
        } else {
            Err(self.wrong_mode(operation))
        }
    }

    fn wrong_mode(&self, operation: &'static str) -> DrawError {
        DrawError::InvalidState {
            operation,
            state: "drawing a drag shape",
        }
    }
}
