//! Tile store: the live tiling and its adjacency graph.
//!
//! Tiles are keyed by [`TileId`] and refer to each other only through
//! [`Link`] ids. The store owns the symmetric-link invariant: for every
//! `tile.neighbours[i] == Some(Link { tile: t, edge: j })`, tile `t` exists and
//! `t.neighbours[j]` points back at `(tile, i)`. [`TileStore::insert`] and
//! [`TileStore::remove`] are the only mutations and both keep it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::tile::{EdgeRef, Link, Tile, TileId};

/// In-memory store of placed tiles.
#[derive(Debug, Default)]
pub struct TileStore {
    tiles: BTreeMap<TileId, Tile>,
}

impl TileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { tiles: BTreeMap::new() }
    }

    /// Insert a tile and set the reciprocal link on each neighbour it names.
    ///
    /// Links to tiles that are not live are dropped from the inserted tile.
    /// Replacing an existing id detaches the old tile first. Tiles without
    /// exactly one neighbour slot per edge are refused and `false` returned.
    pub fn insert(&mut self, mut tile: Tile) -> bool {
        if tile.is_empty() || tile.neighbours.len() != tile.len() {
            warn!(tile = %tile.id, edges = tile.len(), slots = tile.neighbours.len(), "refusing malformed tile");
            return false;
        }
        if self.tiles.contains_key(&tile.id) {
            self.remove(tile.id);
        }
        for (i, slot) in tile.neighbours.iter_mut().enumerate() {
            let Some(link) = *slot else {
                continue;
            };
            match self.tiles.get_mut(&link.tile) {
                Some(other) => other.set_neighbour(link.edge as isize, Some(Link { tile: tile.id, edge: i })),
                None => {
                    debug!(tile = %tile.id, edge = i, neighbour = %link.tile, "dropping link to missing tile");
                    *slot = None;
                }
            }
        }
        self.tiles.insert(tile.id, tile);
        true
    }

    /// Remove a tile by id, clearing the links that point back at it.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let tile = self.tiles.remove(&id)?;
        for link in tile.neighbours.iter().flatten() {
            if let Some(other) = self.tiles.get_mut(&link.tile) {
                let edge = link.edge as isize;
                if other.neighbour(edge).is_some_and(|back| back.tile == id) {
                    other.set_neighbour(edge, None);
                }
            }
        }
        Some(tile)
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    /// Tiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<TileId> {
        self.tiles.keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Every edge without a neighbour, ordered by tile id then edge index.
    #[must_use]
    pub fn open_edges(&self) -> Vec<EdgeRef> {
        self.tiles
            .values()
            .flat_map(|t| t.open_edges().into_iter().map(|edge| EdgeRef { tile: t.id, edge }))
            .collect()
    }

    /// Parity for a new tile with the given neighbour slots.
    ///
    /// Opposite to the first linked neighbour; 0 with no neighbours. A
    /// neighbour set that disagrees is logged and otherwise ignored.
    #[must_use]
    pub fn parity_for(&self, neighbours: &[Option<Link>]) -> u8 {
        let mut parity = None;
        for link in neighbours.iter().flatten() {
            let Some(other) = self.tiles.get(&link.tile) else {
                continue;
            };
            let wanted = (other.parity + 1) % 2;
            match parity {
                None => parity = Some(wanted),
                Some(p) if p != wanted => {
                    warn!(neighbour = %link.tile, expected = p, found = wanted, "parity mismatch");
                }
                Some(_) => {}
            }
        }
        parity.unwrap_or(0)
    }

    /// Check the symmetric-link invariant across the whole store.
    #[must_use]
    pub fn links_consistent(&self) -> bool {
        self.tiles.values().all(|t| {
            t.neighbours.iter().enumerate().all(|(i, slot)| match slot {
                None => true,
                Some(link) => self
                    .tiles
                    .get(&link.tile)
                    .and_then(|other| other.neighbours.get(link.edge).copied().flatten())
                    .is_some_and(|back| back == Link { tile: t.id, edge: i }),
            })
        })
    }
}
