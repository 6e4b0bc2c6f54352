use super::*;
use crate::matrix::Matrix;
use crate::tile::{Boundary, PieceId};
use crate::vector::Vector;

fn square_at(id: u64, x: f64, y: f64) -> Tile {
    let boundary = Boundary::new(vec![
        Vector::new(x, y),
        Vector::new(x + 1.0, y),
        Vector::new(x + 1.0, y + 1.0),
        Vector::new(x, y + 1.0),
    ]);
    Tile::new(TileId(id), PieceId(0), Matrix::translate(Vector::new(x, y)), boundary, vec![None; 4])
}

/// Square 1 at the origin with square 2 stacked on its top edge.
fn stacked_pair() -> TileStore {
    let mut store = TileStore::new();
    store.insert(square_at(1, 0.0, 0.0));
    let mut upper = square_at(2, 0.0, 1.0);
    upper.neighbours[0] = Some(Link { tile: TileId(1), edge: 2 });
    store.insert(upper);
    store
}

// =============================================================
// insert / remove
// =============================================================

#[test]
fn insert_sets_reciprocal_link() {
    let store = stacked_pair();
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(TileId(1)).unwrap().neighbours[2], Some(Link { tile: TileId(2), edge: 0 }));
    assert!(store.links_consistent());
}

#[test]
fn insert_drops_link_to_missing_tile() {
    let mut store = TileStore::new();
    let mut t = square_at(5, 0.0, 0.0);
    t.neighbours[1] = Some(Link { tile: TileId(99), edge: 3 });
    store.insert(t);
    assert!(store.get(TileId(5)).unwrap().neighbours[1].is_none());
    assert!(store.links_consistent());
}

#[test]
fn insert_refuses_tile_without_a_slot_per_edge() {
    let mut store = stacked_pair();
    let mut short = square_at(3, 1.0, 0.0);
    short.neighbours = vec![Some(Link { tile: TileId(1), edge: 1 })];
    assert!(!store.insert(short));

    let empty = Tile::new(TileId(4), PieceId(0), Matrix::IDENTITY, Boundary::new(Vec::new()), Vec::new());
    assert!(!store.insert(empty));

    assert_eq!(store.len(), 2);
    assert!(store.get(TileId(1)).unwrap().neighbours[1].is_none());
    assert!(store.links_consistent());
}

#[test]
fn remove_clears_reciprocal_link() {
    let mut store = stacked_pair();
    let removed = store.remove(TileId(2)).unwrap();
    assert_eq!(removed.id, TileId(2));
    assert!(store.get(TileId(1)).unwrap().neighbours[2].is_none());
    assert!(store.links_consistent());
}

#[test]
fn remove_missing_is_none() {
    let mut store = stacked_pair();
    assert!(store.remove(TileId(42)).is_none());
    assert_eq!(store.len(), 2);
}

#[test]
fn reinsert_after_remove_restores_links() {
    let mut store = stacked_pair();
    let upper = store.remove(TileId(2)).unwrap();
    store.insert(upper);
    assert_eq!(store.get(TileId(1)).unwrap().neighbours[2], Some(Link { tile: TileId(2), edge: 0 }));
    assert!(store.links_consistent());
}

#[test]
fn insert_same_id_replaces_tile() {
    let mut store = stacked_pair();
    store.insert(square_at(2, 5.0, 5.0));
    assert_eq!(store.len(), 2);
    assert!(store.get(TileId(1)).unwrap().neighbours[2].is_none());
    assert!(store.links_consistent());
}

// =============================================================
// Queries
// =============================================================

#[test]
fn open_edges_are_ordered_by_tile_then_edge() {
    let store = stacked_pair();
    let open = store.open_edges();
    assert_eq!(open.len(), 6);
    assert_eq!(open[0], EdgeRef { tile: TileId(1), edge: 0 });
    assert_eq!(open[2], EdgeRef { tile: TileId(1), edge: 3 });
    assert_eq!(open[3], EdgeRef { tile: TileId(2), edge: 1 });
}

#[test]
fn ids_and_iter_are_sorted() {
    let mut store = TileStore::new();
    store.insert(square_at(3, 0.0, 0.0));
    store.insert(square_at(1, 4.0, 0.0));
    assert_eq!(store.ids(), vec![TileId(1), TileId(3)]);
    assert_eq!(store.iter().map(|t| t.id).collect::<Vec<_>>(), vec![TileId(1), TileId(3)]);
    assert!(store.contains(TileId(3)));
    assert!(!store.is_empty());
}

// =============================================================
// Parity
// =============================================================

#[test]
fn parity_without_neighbours_is_zero() {
    let store = TileStore::new();
    assert_eq!(store.parity_for(&[None, None]), 0);
}

#[test]
fn parity_alternates_with_first_neighbour() {
    let mut store = stacked_pair();
    store.get_mut(TileId(1)).unwrap().parity = 0;
    store.get_mut(TileId(2)).unwrap().parity = 1;
    assert_eq!(store.parity_for(&[Some(Link { tile: TileId(1), edge: 0 })]), 1);
    assert_eq!(store.parity_for(&[None, Some(Link { tile: TileId(2), edge: 1 })]), 0);
}

#[test]
fn parity_mismatch_keeps_first_neighbour() {
    let mut store = stacked_pair();
    store.get_mut(TileId(1)).unwrap().parity = 0;
    store.get_mut(TileId(2)).unwrap().parity = 0;
    let neighbours = [Some(Link { tile: TileId(1), edge: 0 }), Some(Link { tile: TileId(2), edge: 1 })];
    assert_eq!(store.parity_for(&neighbours), 1);
}
