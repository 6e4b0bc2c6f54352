//! Undo/redo log.
//!
//! Every user gesture that changes the tiling produces one [`HistoryAction`]:
//! an ordered list of plain-data [`Command`]s. Undo hands back the inverse
//! commands in reverse order, redo hands back the recorded commands in order.
//! The session applies them; this module never touches the tiling itself.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};

use crate::tile::{PieceId, Tile};

/// One reversible change to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Insert `tile` and link it to the neighbours it names.
    Place { tile: Tile },
    /// Remove `tile`; the payload is its state at removal time.
    Remove { tile: Tile },
    /// Flip a piece's `active` flag.
    TogglePiece { piece: PieceId },
}

impl Command {
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Place { tile } => Self::Remove { tile: tile.clone() },
            Self::Remove { tile } => Self::Place { tile: tile.clone() },
            Self::TogglePiece { piece } => Self::TogglePiece { piece: *piece },
        }
    }
}

/// Commands recorded for one gesture, in application order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryAction {
    pub commands: Vec<Command>,
}

impl HistoryAction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands that revert this action, last recorded first.
    #[must_use]
    pub fn inverse(&self) -> Vec<Command> {
        self.commands.iter().rev().map(Command::inverse).collect()
    }
}

/// Undo and redo stacks of actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    undo: Vec<HistoryAction>,
    redo: Vec<HistoryAction>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished action and discard the redo stack.
    ///
    /// Empty actions are ignored and leave the redo stack alone. Returns
    /// whether the action was recorded.
    pub fn push(&mut self, action: HistoryAction) -> bool {
        if action.is_empty() {
            return false;
        }
        self.redo.clear();
        self.undo.push(action);
        true
    }

    /// Pop the latest action and return the commands that revert it.
    pub fn undo(&mut self) -> Option<Vec<Command>> {
        let action = self.undo.pop()?;
        let commands = action.inverse();
        self.redo.push(action);
        Some(commands)
    }

    /// Pop the latest undone action and return its commands for replay.
    pub fn redo(&mut self) -> Option<Vec<Command>> {
        let action = self.redo.pop()?;
        let commands = action.commands.clone();
        self.undo.push(action);
        Some(commands)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
