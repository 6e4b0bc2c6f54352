//! Polygon boundaries and placed tiles.
//!
//! A [`Boundary`] is a cyclic vertex sequence with wrap-around accessors for
//! points, edges and corner signatures. A [`Tile`] is a boundary placed in the
//! shared tiling, with a neighbour slot per edge.
//!
//! Neighbour slots store ids ([`Link`]), never references; the symmetric-link
//! invariant is maintained by [`crate::doc::TileStore`].

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Map a possibly negative index onto `0..n`. An empty range maps to 0.
#[must_use]
pub fn wrap_index(i: isize, n: usize) -> usize {
    i.checked_rem_euclid(n as isize).unwrap_or(0) as usize
}

/// Identifier of a placed tile. Allocated monotonically by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Identifier of a piece template: its index in the session's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub usize);

/// One side of an edge adjacency: `edge` of `tile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Link {
    pub tile: TileId,
    pub edge: usize,
}

/// An edge of a placed tile, used to address open edges and their widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub tile: TileId,
    pub edge: usize,
}

/// Turn signature at a vertex.
///
/// `dot` is the cosine between the incoming and outgoing edge directions and
/// `sign` the sign of their cross product (`-1`, `0` or `1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub dot: f64,
    pub sign: i8,
}

impl Corner {
    /// The two corners add up to a straight angle on the same side.
    #[must_use]
    pub fn supplements(&self, other: &Self) -> bool {
        (self.dot + other.dot).abs() < EPSILON && self.sign == other.sign && self.sign > 0
    }

    /// The two corners are the same angle turned opposite ways, i.e. they
    /// close a joint when the boundaries run against each other.
    #[must_use]
    pub fn mirrors(&self, other: &Self) -> bool {
        (self.dot - other.dot).abs() < EPSILON && self.sign == -other.sign
    }

    /// Same angle, same handedness.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        (self.dot - other.dot).abs() < EPSILON && self.sign == other.sign
    }
}

/// `Math.sign`-style sign: exact zero stays zero.
fn sign_of(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Orientation of a shape on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// The probe point beside edge 0 hits the shape itself.
    Front,
    /// The probe point hits something else (or nothing).
    #[default]
    Back,
}

impl Direction {
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Self::Front => 1,
            Self::Back => -1,
        }
    }
}

/// Cyclic polygon boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    points: Vec<Vector>,
}

impl Boundary {
    #[must_use]
    pub fn new(points: Vec<Vector>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Vertex `i`, wrapping. An empty boundary yields the origin.
    #[must_use]
    pub fn point(&self, i: isize) -> Vector {
        self.points.get(wrap_index(i, self.points.len())).copied().unwrap_or_default()
    }

    /// Vector from vertex `i` to vertex `i + 1`.
    #[must_use]
    pub fn edge(&self, i: isize) -> Vector {
        self.point(i + 1) - self.point(i)
    }

    /// Turn signature at vertex `i`, between edge `i - 1` and edge `i`.
    #[must_use]
    pub fn corner(&self, i: isize) -> Corner {
        let v1 = self.edge(i - 1).normalize();
        let v2 = self.edge(i).normalize();
        Corner { dot: v1.dot(v2), sign: sign_of(v1.cross(v2)) }
    }

    /// Vertex centroid.
    #[must_use]
    pub fn center(&self) -> Vector {
        let sum = self.points.iter().fold(Vector::ZERO, |acc, p| acc + *p);
        sum * (1.0 / self.points.len() as f64)
    }

    #[must_use]
    pub fn transformed(&self, transform: &Matrix) -> Self {
        Self { points: self.points.iter().map(|p| transform.apply(*p)).collect() }
    }

    /// Length of the canonical prefix.
    ///
    /// The smallest proper divisor `k` of the boundary length such that edge
    /// lengths and corner signatures repeat with period `k`; the full length
    /// when the boundary has no rotational self-similarity.
    #[must_use]
    pub fn canonical_len(&self) -> usize {
        let n = self.points.len();
        'candidate: for k in 1..n {
            if n % k != 0 {
                continue;
            }
            for j in k..n {
                let (j, r) = (j as isize, (j % k) as isize);
                let c1 = self.corner(j);
                let c2 = self.corner(r);
                if (self.edge(j).length() - self.edge(r).length()).abs() > EPSILON || !c1.matches(&c2) {
                    continue 'candidate;
                }
            }
            return k;
        }
        n
    }

    /// The canonical prefix itself (`original_points`).
    #[must_use]
    pub fn canonical_points(&self) -> &[Vector] {
        &self.points[..self.canonical_len()]
    }
}

/// A polygon placed in the shared tiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Template this tile was stamped from.
    pub piece: PieceId,
    /// Placement transform applied to the template.
    pub transform: Matrix,
    pub boundary: Boundary,
    /// Length of the canonical prefix of `boundary`.
    pub canonical_len: usize,
    /// One slot per edge; `None` is an open edge.
    pub neighbours: Vec<Option<Link>>,
    /// Alternating colour, 0 or 1.
    pub parity: u8,
    pub direction: Direction,
}

impl Tile {
    /// Build a tile from already-transformed points. Parity and direction are
    /// resolved later against the store and the surface.
    ///
    /// `neighbours` needs one slot per boundary edge; [`TileStore::insert`]
    /// refuses tiles where it does not.
    ///
    /// [`TileStore::insert`]: crate::doc::TileStore::insert
    #[must_use]
    pub fn new(id: TileId, piece: PieceId, transform: Matrix, boundary: Boundary, neighbours: Vec<Option<Link>>) -> Self {
        let canonical_len = boundary.canonical_len();
        Self {
            id,
            piece,
            transform,
            boundary,
            canonical_len,
            neighbours,
            parity: 0,
            direction: Direction::default(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    #[must_use]
    pub fn point(&self, i: isize) -> Vector {
        self.boundary.point(i)
    }

    #[must_use]
    pub fn edge(&self, i: isize) -> Vector {
        self.boundary.edge(i)
    }

    #[must_use]
    pub fn corner(&self, i: isize) -> Corner {
        self.boundary.corner(i)
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        self.boundary.center()
    }

    /// Neighbour across edge `i`, wrapping.
    #[must_use]
    pub fn neighbour(&self, i: isize) -> Option<Link> {
        self.neighbours.get(wrap_index(i, self.neighbours.len())).copied().flatten()
    }

    /// Set or clear the neighbour across edge `i`, wrapping.
    pub fn set_neighbour(&mut self, i: isize, link: Option<Link>) {
        let n = self.neighbours.len();
        if let Some(slot) = self.neighbours.get_mut(wrap_index(i, n)) {
            *slot = link;
        }
    }

    /// Indices of edges with no neighbour.
    #[must_use]
    pub fn open_edges(&self) -> Vec<usize> {
        self.neighbours
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Point just beside the midpoint of edge 0, on its left-normal side.
    #[must_use]
    pub fn direction_probe(&self) -> Vector {
        direction_probe(&self.boundary)
    }
}

/// Point used to resolve [`Direction`] for a boundary.
#[must_use]
pub fn direction_probe(boundary: &Boundary) -> Vector {
    let p = boundary.point(0);
    let e = boundary.edge(0);
    p + e * 0.5 + e.perp() * crate::consts::DIRECTION_PROBE_OFFSET
}
