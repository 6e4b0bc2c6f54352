//! Scripted input sessions: a JSON array of tagged events replayed against
//! an [`EditorSession`].

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tiling::engine::{Action, EditorSession};
use tiling::input::{Button, Key, Modifiers, WheelDelta};
use tiling::surface::Surface;
use tiling::tile::PieceId;
use tiling::vector::Vector;
use tracing::debug;

use crate::CliError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    ClickPiece {
        piece: String,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "primary")]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Wheel {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    TogglePiece {
        piece: String,
    },
    Clear,
    Undo,
    Redo,
    SetPropagate {
        depth: usize,
    },
}

fn primary() -> Button {
    Button::Primary
}

/// Totals for a replayed script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub events: usize,
    pub actions: usize,
    pub exports: usize,
}

/// # Errors
///
/// Fails when the file cannot be read or does not hold a list of events.
pub fn load(path: &Path) -> Result<Vec<ScriptEvent>, CliError> {
    let json = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_owned(), source })?;
    Ok(serde_json::from_str(&json)?)
}

impl ScriptEvent {
    /// Feed this event to `session`.
    ///
    /// # Errors
    ///
    /// Fails when the event names a piece the session does not know.
    pub fn apply<S: Surface>(&self, session: &mut EditorSession<S>) -> Result<Vec<Action>, CliError> {
        let actions = match self {
            Self::ClickPiece { piece } => {
                let id = lookup(session, piece)?;
                session.click_piece(id)
            }
            Self::PointerMove { x, y } => session.on_pointer_move(Vector::new(*x, *y)),
            Self::PointerDown { x, y, button, modifiers } => {
                session.on_pointer_down(Vector::new(*x, *y), *button, *modifiers)
            }
            Self::Key { key, modifiers } => session.on_key_down(&Key(key.clone()), *modifiers),
            Self::Wheel { dx, dy } => session.on_wheel(WheelDelta { dx: *dx, dy: *dy }),
            Self::TogglePiece { piece } => {
                let id = lookup(session, piece)?;
                session.toggle_piece(id)
            }
            Self::Clear => session.clear(),
            Self::Undo => session.undo(),
            Self::Redo => session.redo(),
            Self::SetPropagate { depth } => {
                session.set_propagate(*depth);
                Vec::new()
            }
        };
        Ok(actions)
    }
}

fn lookup<S: Surface>(session: &EditorSession<S>, name: &str) -> Result<PieceId, CliError> {
    session.piece_named(name).ok_or_else(|| CliError::UnknownPiece(name.to_owned()))
}

/// Replay `events` in order, calling `export` for every export request.
///
/// # Errors
///
/// Stops at the first event or export that fails.
pub fn replay<S, F>(session: &mut EditorSession<S>, events: &[ScriptEvent], mut export: F) -> Result<RunReport, CliError>
where
    S: Surface,
    F: FnMut(&EditorSession<S>) -> Result<(), CliError>,
{
    let mut report = RunReport::default();
    for (n, event) in events.iter().enumerate() {
        let actions = event.apply(session)?;
        debug!(event = n, ?event, actions = actions.len(), "replayed");
        report.events += 1;
        report.actions += actions.len();
        if actions.contains(&Action::ExportRequested) {
            export(session)?;
            report.exports += 1;
        }
    }
    Ok(report)
}
