//! Piece library files: `{ "pieces": [ { "id", "d", "active" } ] }`.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tiling::engine::EditorSession;
use tiling::surface::Surface;
use tiling::tile::PieceId;
use tracing::info;

use crate::CliError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PieceLibrary {
    pub pieces: Vec<PieceEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PieceEntry {
    /// Name scripts refer to the piece by.
    pub id: String,
    /// Outline as straight-line SVG path data.
    pub d: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl PieceLibrary {
    /// # Errors
    ///
    /// Fails on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid library.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let json = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_owned(), source })?;
        Self::from_json(&json)
    }

    /// Register every piece with `session`, in file order.
    ///
    /// # Errors
    ///
    /// Stops at the first duplicate name or invalid outline.
    pub fn install<S: Surface>(&self, session: &mut EditorSession<S>) -> Result<Vec<PieceId>, CliError> {
        let mut seen = BTreeSet::new();
        let mut ids = Vec::with_capacity(self.pieces.len());
        for entry in &self.pieces {
            if !seen.insert(entry.id.as_str()) {
                return Err(CliError::DuplicatePiece(entry.id.clone()));
            }
            let id = session
                .register_piece(&entry.id, &entry.d)
                .map_err(|source| CliError::Piece { name: entry.id.clone(), source })?;
            if !entry.active {
                session.set_piece_active(id, false);
            }
            ids.push(id);
        }
        info!(count = ids.len(), "piece library installed");
        Ok(ids)
    }
}
