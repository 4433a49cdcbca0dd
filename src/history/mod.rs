//! Undo/redo command engine.
//!
//! [`History`] is generic over the state its commands mutate. The editor uses
//! it with [`Canvas`](crate::draw::Canvas) and the commands in [`commands`], but
//! nothing here knows about shapes.

pub mod commands;

pub use commands::{AddShape, RemoveShape};

use crate::error::Result;
use log::debug;
use std::collections::VecDeque;
use std::fmt;

/// One reversible mutation of a `T`.
///
/// `revert` must undo exactly what `apply` did, so that
/// `revert(apply(state)) == state` for the part of the state the command touches.
/// Commands are immutable once built; anything they need is captured up front.
pub trait Command<T>: fmt::Debug {
    /// Runs the forward action.
    fn apply(&self, target: &mut T) -> Result<()>;

    /// Runs the reverse action.
    fn revert(&self, target: &mut T) -> Result<()>;

    /// Short human-readable name for logs and menus.
    fn label(&self) -> String;
}

/// Undo and redo stacks of executed commands.
pub struct History<T> {
    undo_stack: VecDeque<Box<dyn Command<T>>>,
    redo_stack: Vec<Box<dyn Command<T>>>,
    max_depth: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<T> History<T> {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::with_depth(0)
    }

    /// Creates a history keeping at most `max_depth` undo steps (0 = unbounded).
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Applies `command` and records it. Clears the redo stack.
    ///
    /// A command whose forward action fails is not recorded and the redo stack
    /// is left untouched.
    pub fn execute(&mut self, command: Box<dyn Command<T>>, target: &mut T) -> Result<()> {
        command.apply(target)?;
        debug!("executed {}", command.label());
        self.redo_stack.clear();
        self.undo_stack.push_back(command);

        if self.max_depth > 0 && self.undo_stack.len() > self.max_depth {
            if let Some(dropped) = self.undo_stack.pop_front() {
                debug!("history full; forgetting {}", dropped.label());
            }
        }
        Ok(())
    }

    /// Reverts the most recent command. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, target: &mut T) -> Result<bool> {
        let Some(command) = self.undo_stack.pop_back() else {
            return Ok(false);
        };
        if let Err(err) = command.revert(target) {
            self.undo_stack.push_back(command);
            return Err(err);
        }
        debug!("undid {}", command.label());
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-applies the most recently undone command. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self, target: &mut T) -> Result<bool> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.apply(target) {
            self.redo_stack.push(command);
            return Err(err);
        }
        debug!("redid {}", command.label());
        self.undo_stack.push_back(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the command `undo` would revert.
    pub fn undo_label(&self) -> Option<String> {
        self.undo_stack.back().map(|c| c.label())
    }

    /// Label of the command `redo` would re-apply.
    pub fn redo_label(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.label())
    }

    /// Forgets both stacks without running anything.
    pub fn clear_all(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
