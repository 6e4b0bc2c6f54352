//! The editor session: every piece of mutable editor state and the input
//! handlers that drive it.
//!
//! [`EditorSession`] owns the piece library, the tile store, the history log,
//! the hovered candidates and the open-edge widgets. Handlers return
//! [`Action`]s describing what changed so the host can redraw or persist.
//! Drawing goes through the [`Surface`] the session was built with.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::candidate::{CandidateSet, edge_candidates};
use crate::consts::{DEFAULT_PROPAGATE, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::doc::TileStore;
use crate::hit::{EdgeWidget, edges_at};
use crate::history::{Command, History, HistoryAction};
use crate::input::{Button, Key, Modifiers, Shortcut, WheelDelta};
use crate::matrix::Matrix;
use crate::piece::{Piece, PieceError};
use crate::surface::{Surface, VisualHandle};
use crate::tile::{Direction, EdgeRef, Link, PieceId, Tile, TileId, direction_probe};
use crate::vector::Vector;

/// Style class for visuals created only to resolve a piece's orientation.
const PROBE_CLASS: &str = "probe";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    TilePlaced { id: TileId },
    TileRemoved { id: TileId },
    PieceToggled { piece: PieceId, active: bool },
    /// Open edges were rebuilt.
    EdgesChanged { open: usize, impossible: usize },
    /// The selected candidate changed; `None` hides the preview.
    CandidateChanged { preview: Option<CandidatePreview> },
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// The user asked for the tiling to be exported.
    ExportRequested,
    RenderNeeded,
}

/// What the host needs to draw the selected candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidatePreview {
    pub piece: PieceId,
    pub transform: Matrix,
    /// Position of the selection in the candidate list.
    pub index: usize,
    pub count: usize,
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<'a> {
    pub pieces: Vec<PieceState<'a>>,
    pub tiles: Vec<&'a Tile>,
    pub history: &'a History,
    pub propagate: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieceState<'a> {
    pub id: PieceId,
    pub name: &'a str,
    pub active: bool,
    pub canonical_len: usize,
    pub direction: Direction,
}

/// A tiling editor bound to a rendering surface.
pub struct EditorSession<S: Surface> {
    pieces: Vec<Piece>,
    store: TileStore,
    visuals: BTreeMap<TileId, VisualHandle>,
    history: History,
    candidates: CandidateSet,
    widgets: Vec<EdgeWidget>,
    next_tile_id: u64,
    propagate: usize,
    viewport: Vector,
    surface: S,
}

impl<S: Surface> EditorSession<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            pieces: Vec::new(),
            store: TileStore::new(),
            visuals: BTreeMap::new(),
            history: History::new(),
            candidates: CandidateSet::new(),
            widgets: Vec::new(),
            next_tile_id: 0,
            propagate: DEFAULT_PROPAGATE,
            viewport: Vector::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            surface,
        }
    }

    // --- Configuration ---

    /// Viewport size, used to centre the first tile.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Vector::new(width, height);
    }

    /// Propagation depth for confirmations and piece clicks.
    pub fn set_propagate(&mut self, depth: usize) {
        self.propagate = depth;
    }

    /// Set a piece's initial `active` flag, as loaded from a library. Not
    /// recorded in history; returns `false` for unknown pieces.
    pub fn set_piece_active(&mut self, piece: PieceId, active: bool) -> bool {
        match self.pieces.get_mut(piece.0) {
            Some(p) => {
                p.active = active;
                true
            }
            None => false,
        }
    }

    /// Parse, validate and register a piece template.
    ///
    /// # Errors
    ///
    /// Returns [`PieceError`] for unparsable or degenerate outlines; nothing
    /// is registered in that case.
    pub fn register_piece(&mut self, name: &str, d: &str) -> Result<PieceId, PieceError> {
        let id = PieceId(self.pieces.len());
        let mut piece = Piece::parse(id, name, d)?;
        self.surface.define_piece(&piece);

        let handle = self.surface.create_visual(id, &Matrix::IDENTITY, PROBE_CLASS);
        piece.direction = self.resolve_direction(direction_probe(&piece.boundary), handle);
        self.surface.remove_visual(handle);

        info!(
            piece = name,
            points = piece.len(),
            canonical = piece.canonical_len,
            direction = ?piece.direction,
            "registered piece"
        );
        self.pieces.push(piece);
        Ok(id)
    }

    // --- Queries ---

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    /// Look up a piece by library name.
    #[must_use]
    pub fn piece_named(&self, name: &str) -> Option<PieceId> {
        self.pieces.iter().find(|p| p.name == name).map(|p| p.id)
    }

    #[must_use]
    pub fn tiles(&self) -> &TileStore {
        &self.store
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Widgets for the current open edges.
    #[must_use]
    pub fn widgets(&self) -> &[EdgeWidget] {
        &self.widgets
    }

    #[must_use]
    pub fn propagate(&self) -> usize {
        self.propagate
    }

    #[must_use]
    pub fn viewport(&self) -> Vector {
        self.viewport
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Visual shown for a placed tile.
    #[must_use]
    pub fn visual_of(&self, id: TileId) -> Option<VisualHandle> {
        self.visuals.get(&id).copied()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            pieces: self
                .pieces
                .iter()
                .map(|p| PieceState {
                    id: p.id,
                    name: &p.name,
                    active: p.active,
                    canonical_len: p.canonical_len,
                    direction: p.direction,
                })
                .collect(),
            tiles: self.store.iter().collect(),
            history: &self.history,
            propagate: self.propagate,
        }
    }

    // --- Editor operations ---

    /// Palette click. Seeds the tiling with `piece` centred in the viewport
    /// when it is empty, otherwise toggles the piece's `active` flag.
    pub fn click_piece(&mut self, piece: PieceId) -> Vec<Action> {
        if self.store.is_empty() {
            self.seed(piece)
        } else {
            self.toggle_piece(piece)
        }
    }

    /// Flip a piece's `active` flag as its own history action.
    pub fn toggle_piece(&mut self, piece: PieceId) -> Vec<Action> {
        if self.piece(piece).is_none() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut action = HistoryAction::new();
        let command = Command::TogglePiece { piece };
        self.apply(&command, &mut out);
        action.push(command);
        self.refresh_edges(self.propagate, &mut action, &mut out);
        self.commit(action, &mut out);
        out
    }

    /// Place the selected candidate and propagate forced placements.
    pub fn confirm_candidate(&mut self) -> Vec<Action> {
        let Some(candidate) = self.candidates.selected().cloned() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut action = HistoryAction::new();
        self.place_new(candidate.piece, candidate.transform, candidate.neighbours, &mut action, &mut out);
        self.refresh_edges(self.propagate, &mut action, &mut out);
        self.commit(action, &mut out);
        out
    }

    /// Move the candidate selection by `step`, wrapping.
    pub fn cycle_candidate(&mut self, step: isize) -> Vec<Action> {
        if step == 0 || !self.candidates.cycle(step) {
            return Vec::new();
        }
        vec![Action::CandidateChanged { preview: self.preview() }, Action::RenderNeeded]
    }

    /// Remove one tile as its own history action. No propagation follows.
    pub fn remove_tile(&mut self, id: TileId) -> Vec<Action> {
        let Some(tile) = self.store.get(id).cloned() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut action = HistoryAction::new();
        let command = Command::Remove { tile };
        self.apply(&command, &mut out);
        action.push(command);
        self.refresh_edges(0, &mut action, &mut out);
        self.commit(action, &mut out);
        out
    }

    /// Remove every tile in a single history action.
    pub fn clear(&mut self) -> Vec<Action> {
        if self.store.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut action = HistoryAction::new();
        for id in self.store.ids() {
            // Snapshot at removal time: earlier removals have already unlinked it.
            let Some(tile) = self.store.get(id).cloned() else {
                continue;
            };
            let command = Command::Remove { tile };
            self.apply(&command, &mut out);
            action.push(command);
        }
        self.refresh_edges(0, &mut action, &mut out);
        self.commit(action, &mut out);
        out
    }

    /// Revert the latest action. A no-op on an empty history.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(commands) = self.history.undo() else {
            return Vec::new();
        };
        self.replay(&commands)
    }

    /// Re-apply the latest undone action. A no-op on an empty redo stack.
    pub fn redo(&mut self) -> Vec<Action> {
        let Some(commands) = self.history.redo() else {
            return Vec::new();
        };
        self.replay(&commands)
    }

    // --- Input events ---

    /// Track the edges under the pointer and rebuild candidates when the
    /// hovered set changes.
    pub fn on_pointer_move(&mut self, p: Vector) -> Vec<Action> {
        let hovered = edges_at(&self.widgets, p);
        if !self.candidates.update_hover(hovered, &self.pieces, &self.store) {
            return Vec::new();
        }
        vec![Action::CandidateChanged { preview: self.preview() }, Action::RenderNeeded]
    }

    /// Primary confirms the selected candidate; secondary removes the topmost
    /// tile under the pointer.
    pub fn on_pointer_down(&mut self, p: Vector, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match button {
            Button::Primary => self.confirm_candidate(),
            Button::Secondary => match self.tile_at(p) {
                Some(id) => self.remove_tile(id),
                None => Vec::new(),
            },
            Button::Middle => Vec::new(),
        }
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match Shortcut::from_key(key, modifiers) {
            Some(Shortcut::NextCandidate) => self.cycle_candidate(1),
            Some(Shortcut::PreviousCandidate) => self.cycle_candidate(-1),
            Some(Shortcut::Undo) => self.undo(),
            Some(Shortcut::Redo) => self.redo(),
            Some(Shortcut::Export) => vec![Action::ExportRequested],
            None => Vec::new(),
        }
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.cycle_candidate(delta.step())
    }

    /// Placed tile whose visual is topmost at `p`.
    #[must_use]
    pub fn tile_at(&self, p: Vector) -> Option<TileId> {
        let handle = self.surface.topmost_shape_at(p)?;
        self.visuals.iter().find(|(_, h)| **h == handle).map(|(id, _)| *id)
    }

    // --- Internals ---

    fn seed(&mut self, piece: PieceId) -> Vec<Action> {
        let Some(template) = self.piece(piece) else {
            return Vec::new();
        };
        let center = self.viewport * 0.5 - template.boundary.center();
        let neighbours = vec![None; template.len()];
        let mut out = Vec::new();
        let mut action = HistoryAction::new();
        self.place_new(piece, Matrix::translate(center), neighbours, &mut action, &mut out);
        self.refresh_edges(self.propagate, &mut action, &mut out);
        self.commit(action, &mut out);
        out
    }

    /// Stamp a new tile, resolve parity and orientation, and record it.
    fn place_new(
        &mut self,
        piece: PieceId,
        transform: Matrix,
        neighbours: Vec<Option<Link>>,
        action: &mut HistoryAction,
        out: &mut Vec<Action>,
    ) {
        let Some(template) = self.pieces.get(piece.0) else {
            return;
        };
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;

        let mut tile = template.stamp(id, transform, neighbours);
        tile.parity = self.store.parity_for(&tile.neighbours);
        let probe = tile.direction_probe();
        let Some(handle) = self.attach(tile, out) else {
            return;
        };
        let direction = self.resolve_direction(probe, handle);

        if let Some(placed) = self.store.get_mut(id) {
            placed.direction = direction;
            debug!(tile = %id, piece = piece.0, parity = placed.parity, "placed tile");
            action.push(Command::Place { tile: placed.clone() });
        }
    }

    fn resolve_direction(&self, probe: Vector, own: VisualHandle) -> Direction {
        if self.surface.topmost_shape_at(probe) == Some(own) { Direction::Front } else { Direction::Back }
    }

    fn attach(&mut self, tile: Tile, out: &mut Vec<Action>) -> Option<VisualHandle> {
        let (id, piece, transform, class) = (tile.id, tile.piece, tile.transform, parity_class(tile.parity));
        if !self.store.insert(tile) {
            return None;
        }
        let handle = self.surface.create_visual(piece, &transform, class);
        if let Some(stale) = self.visuals.insert(id, handle) {
            self.surface.remove_visual(stale);
        }
        out.push(Action::TilePlaced { id });
        Some(handle)
    }

    fn detach(&mut self, id: TileId, out: &mut Vec<Action>) {
        if self.store.remove(id).is_none() {
            return;
        }
        if let Some(handle) = self.visuals.remove(&id) {
            self.surface.remove_visual(handle);
        }
        debug!(tile = %id, "removed tile");
        out.push(Action::TileRemoved { id });
    }

    fn apply(&mut self, command: &Command, out: &mut Vec<Action>) {
        match command {
            Command::Place { tile } => {
                self.attach(tile.clone(), out);
            }
            Command::Remove { tile } => self.detach(tile.id, out),
            Command::TogglePiece { piece } => {
                if let Some(p) = self.pieces.get_mut(piece.0) {
                    p.active = !p.active;
                    out.push(Action::PieceToggled { piece: *piece, active: p.active });
                }
            }
        }
    }

    fn replay(&mut self, commands: &[Command]) -> Vec<Action> {
        let mut out = Vec::new();
        for command in commands {
            self.apply(command, &mut out);
        }
        // Propagation is off, so nothing is recorded here.
        let mut scratch = HistoryAction::new();
        self.refresh_edges(0, &mut scratch, &mut out);
        out.push(self.history_changed());
        out
    }

    /// Rebuild the open-edge widgets, auto-placing single candidates for up to
    /// `depth` passes. Placements are recorded on `action`.
    fn refresh_edges(&mut self, depth: usize, action: &mut HistoryAction, out: &mut Vec<Action>) {
        let mut remaining = depth;
        loop {
            self.widgets = self
                .store
                .open_edges()
                .into_iter()
                .filter_map(|e| self.store.get(e.tile).map(|t| EdgeWidget::new(t, e.edge)))
                .collect();

            let mut placed = 0;
            for k in 0..self.widgets.len() {
                let edge = self.widgets[k].edge;
                if !self.is_open(edge) {
                    continue;
                }
                let found = edge_candidates(&self.pieces, &self.store, edge);
                self.widgets[k].impossible = found.is_empty();
                if remaining > 0
                    && let [only] = found.as_slice()
                {
                    let only = only.clone();
                    self.place_new(only.piece, only.transform, only.neighbours, action, out);
                    placed += 1;
                }
            }

            if placed == 0 {
                break;
            }
            debug!(placed, remaining, "propagation pass");
            remaining -= 1;
        }

        self.candidates.clear();
        let impossible = self.widgets.iter().filter(|w| w.impossible).count();
        out.push(Action::EdgesChanged { open: self.widgets.len(), impossible });
        out.push(Action::CandidateChanged { preview: None });
        out.push(Action::RenderNeeded);
    }

    fn is_open(&self, edge: EdgeRef) -> bool {
        self.store.get(edge.tile).is_some_and(|t| t.neighbour(edge.edge as isize).is_none())
    }

    fn commit(&mut self, action: HistoryAction, out: &mut Vec<Action>) {
        if self.history.push(action) {
            out.push(self.history_changed());
        }
    }

    fn history_changed(&self) -> Action {
        Action::HistoryChanged { can_undo: self.history.can_undo(), can_redo: self.history.can_redo() }
    }

    fn preview(&self) -> Option<CandidatePreview> {
        let selected = self.candidates.selected()?;
        Some(CandidatePreview {
            piece: selected.piece,
            transform: selected.transform,
            index: self.candidates.selected_index().unwrap_or(0),
            count: self.candidates.candidates().len(),
        })
    }
}

/// Style class for a tile of the given parity.
#[must_use]
pub fn parity_class(parity: u8) -> &'static str {
    if parity == 0 { "even" } else { "odd" }
}
