//! Piece templates and the edge-matching zipper.
//!
//! A [`Piece`] is a polygon from the library that can be stamped into the
//! tiling. [`Piece::fits`] decides whether the piece, anchored at one of its
//! edges, closes consistently against an open edge of a placed tile,
//! crossing onto neighbouring tiles wherever the placed boundary runs straight
//! through a joint.

#[cfg(test)]
#[path = "piece_test.rs"]
mod piece_test;

use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;
use crate::doc::TileStore;
use crate::matrix::Matrix;
use crate::path::{PathError, parse_path};
use crate::tile::{Boundary, Direction, Link, PieceId, Tile, TileId, wrap_index};

/// Reasons a piece template is refused at registration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PieceError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("piece needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("edge {0} has zero length")]
    ZeroLengthEdge(usize),
    #[error("point {0} is not finite")]
    NonFinite(usize),
}

/// A polygon template from the piece library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub name: String,
    /// Path description the boundary was parsed from.
    pub path: String,
    pub boundary: Boundary,
    /// Length of the canonical prefix; only these vertices are tried as anchors.
    pub canonical_len: usize,
    /// Inactive pieces are skipped by candidate enumeration.
    pub active: bool,
    pub direction: Direction,
}

impl Piece {
    /// Parse and validate a piece from its path description.
    ///
    /// # Errors
    ///
    /// Returns [`PieceError`] if the path does not parse or the polygon is
    /// degenerate (fewer than three points, a non-finite coordinate, or an
    /// edge shorter than the matching tolerance).
    pub fn parse(id: PieceId, name: impl Into<String>, d: &str) -> Result<Self, PieceError> {
        let points = parse_path(d)?;
        if let Some(at) = points.iter().position(|p| !p.is_finite()) {
            return Err(PieceError::NonFinite(at));
        }
        if points.len() < 3 {
            return Err(PieceError::TooFewPoints(points.len()));
        }
        let boundary = Boundary::new(points);
        if let Some(at) = (0..boundary.len()).find(|&i| boundary.edge(i as isize).length() < EPSILON) {
            return Err(PieceError::ZeroLengthEdge(at));
        }
        let canonical_len = boundary.canonical_len();
        Ok(Self {
            id,
            name: name.into(),
            path: d.to_owned(),
            boundary,
            canonical_len,
            active: true,
            direction: Direction::default(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// Match this piece's edge `i` against edge `j` of a placed tile.
    ///
    /// Walks the piece boundary forward and backward from `i` while walking
    /// the placed boundary the opposite way from `j`. Every visited pair must
    /// have equal lengths and an open placed edge. Where the two corners ahead
    /// add up to a straight angle the placed walk hops across the joint onto
    /// the linked tile; if nothing is linked there the walk in that direction
    /// stops. Where the corners mirror each other the walk continues on the
    /// same tile. Anything else rejects the match.
    ///
    /// Returns the neighbour slot table for the stamped tile, indexed by this
    /// piece's edges, or `None` when the piece does not fit.
    #[must_use]
    pub fn fits(&self, i: usize, store: &TileStore, tile: TileId, j: usize) -> Option<Vec<Option<Link>>> {
        let n = self.boundary.len();
        let i = i as isize;
        let mut neighbours = vec![None; n];

        for d in [1_isize, -1] {
            let mut current = store.get(tile)?;
            let mut current_edge = j as isize;

            'walk: for k in 0..n as isize {
                let piece_edge = i + k * d;
                let placed_edge = current_edge - k * d;
                let length_gap = (self.boundary.edge(piece_edge).length() - current.edge(placed_edge).length()).abs();
                if length_gap > EPSILON || current.neighbour(placed_edge).is_some() {
                    return None;
                }
                neighbours[wrap_index(piece_edge, n)] = Some(Link {
                    tile: current.id,
                    edge: wrap_index(placed_edge, current.len()),
                });

                let c1 = self.boundary.corner(i + d * k + (1 + d) / 2);
                let c2 = current.corner(current_edge - d * k + (1 - d) / 2);

                if c1.supplements(&c2) {
                    for _ in 0..2 {
                        let Some(next) = current.neighbour(current_edge - (k + 1) * d) else {
                            break 'walk;
                        };
                        current = store.get(next.tile)?;
                        current_edge = next.edge as isize + k * d;
                    }
                    continue;
                }
                if c1.mirrors(&c2) {
                    continue;
                }
                return None;
            }
        }
        Some(neighbours)
    }

    /// Transform that lays this piece's edge `i`, reversed, onto edge `j` of `tile`.
    #[must_use]
    pub fn placement(&self, i: usize, tile: &Tile, j: usize) -> Matrix {
        let (i, j) = (i as isize, j as isize);
        Matrix::rotate_line(self.boundary.point(i + 1), -self.boundary.edge(i), tile.point(j), tile.edge(j))
    }

    /// Stamp a tile from this template.
    #[must_use]
    pub fn stamp(&self, id: TileId, transform: Matrix, neighbours: Vec<Option<Link>>) -> Tile {
        Tile::new(id, self.id, transform, self.boundary.transformed(&transform), neighbours)
    }

    /// Boundary points after `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Matrix) -> Boundary {
        self.boundary.transformed(transform)
    }
}
