use super::*;
use crate::matrix::Matrix;
use crate::tile::{Boundary, TileId};
use crate::vector::Vector;

fn tile(id: u64) -> Tile {
    let boundary = Boundary::new(vec![Vector::new(0.0, 0.0), Vector::new(1.0, 0.0), Vector::new(0.0, 1.0)]);
    Tile::new(TileId(id), PieceId(0), Matrix::IDENTITY, boundary, vec![None; 3])
}

fn action(commands: Vec<Command>) -> HistoryAction {
    HistoryAction { commands }
}

// =============================================================
// Command / HistoryAction
// =============================================================

#[test]
fn place_and_remove_invert_each_other() {
    let place = Command::Place { tile: tile(1) };
    assert_eq!(place.inverse(), Command::Remove { tile: tile(1) });
    assert_eq!(place.inverse().inverse(), place);
}

#[test]
fn toggle_is_self_inverse() {
    let toggle = Command::TogglePiece { piece: PieceId(2) };
    assert_eq!(toggle.inverse(), toggle);
}

#[test]
fn action_inverse_runs_backwards() {
    let a = action(vec![
        Command::Place { tile: tile(1) },
        Command::Place { tile: tile(2) },
        Command::TogglePiece { piece: PieceId(0) },
    ]);
    assert_eq!(
        a.inverse(),
        vec![
            Command::TogglePiece { piece: PieceId(0) },
            Command::Remove { tile: tile(2) },
            Command::Remove { tile: tile(1) },
        ]
    );
}

// =============================================================
// History stacks
// =============================================================

#[test]
fn empty_history_has_nothing_to_do() {
    let mut h = History::new();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(h.undo().is_none());
    assert!(h.redo().is_none());
}

#[test]
fn empty_action_is_not_recorded() {
    let mut h = History::new();
    assert!(!h.push(HistoryAction::new()));
    assert_eq!(h.undo_len(), 0);
}

#[test]
fn undo_then_redo_replays_forward() {
    let mut h = History::new();
    let a = action(vec![Command::Place { tile: tile(1) }, Command::Place { tile: tile(2) }]);
    assert!(h.push(a.clone()));

    let undo = h.undo().unwrap();
    assert_eq!(undo, a.inverse());
    assert!(h.can_redo());
    assert!(!h.can_undo());

    let redo = h.redo().unwrap();
    assert_eq!(redo, a.commands);
    assert!(h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn push_discards_redo_stack() {
    let mut h = History::new();
    h.push(action(vec![Command::Place { tile: tile(1) }]));
    h.undo();
    assert_eq!(h.redo_len(), 1);
    h.push(action(vec![Command::Place { tile: tile(2) }]));
    assert_eq!(h.redo_len(), 0);
    assert_eq!(h.undo_len(), 1);
}

#[test]
fn empty_push_keeps_redo_stack() {
    let mut h = History::new();
    h.push(action(vec![Command::TogglePiece { piece: PieceId(1) }]));
    h.undo();
    h.push(HistoryAction::new());
    assert!(h.can_redo());
}

#[test]
fn history_serializes_with_tagged_commands() {
    let mut h = History::new();
    h.push(action(vec![Command::TogglePiece { piece: PieceId(3) }]));
    let json = serde_json::to_value(&h).unwrap();
    assert_eq!(json["undo"][0]["commands"][0]["op"], "toggle_piece");
    let back: History = serde_json::from_value(json).unwrap();
    assert_eq!(back, h);
}
