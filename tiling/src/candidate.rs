//! Candidate placements for hovered open edges.
//!
//! [`edge_candidates`] lists every way an active piece can close against one
//! open edge. [`CandidateSet`] tracks the edges under the pointer, merges
//! candidates that would put the same piece in the same pose from different
//! edges, and holds the current selection.

#[cfg(test)]
#[path = "candidate_test.rs"]
mod candidate_test;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::consts::EPSILON2;
use crate::doc::TileStore;
use crate::matrix::Matrix;
use crate::piece::Piece;
use crate::tile::{EdgeRef, Link, PieceId, wrap_index};

/// A placement that fits against one or more hovered edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Stable key within a [`CandidateSet`].
    pub serial: u64,
    pub piece: PieceId,
    /// Piece vertex the match was anchored at.
    pub anchor: usize,
    pub neighbours: Vec<Option<Link>>,
    pub transform: Matrix,
    /// Hovered edges this placement answers.
    pub edges: BTreeSet<EdgeRef>,
}

/// Every placement of an active piece that fits against `edge`.
///
/// Only the canonical prefix of each piece is tried as an anchor, so
/// rotationally symmetric pieces are not reported once per symmetry.
#[must_use]
pub fn edge_candidates(pieces: &[Piece], store: &TileStore, edge: EdgeRef) -> Vec<Candidate> {
    let Some(tile) = store.get(edge.tile) else {
        return Vec::new();
    };
    let mut result = Vec::new();
    for piece in pieces.iter().filter(|p| p.active) {
        for j in 0..piece.canonical_len {
            let Some(neighbours) = piece.fits(j, store, edge.tile, edge.edge) else {
                continue;
            };
            result.push(Candidate {
                serial: 0,
                piece: piece.id,
                anchor: j,
                neighbours,
                transform: piece.placement(j, tile, edge.edge),
                edges: BTreeSet::from([edge]),
            });
        }
    }
    result
}

/// Whether `piece` under `t1` and under `t2` covers the same vertex set with
/// the same cyclic order.
#[must_use]
pub fn shape_equals(piece: &Piece, t1: &Matrix, t2: &Matrix) -> bool {
    let a = piece.transformed(t1);
    let b = piece.transformed(t2);
    let points1 = a.points();
    let points2 = b.points();
    let Some(first) = points1.first() else {
        return false;
    };
    let Some(shift) = points2.iter().position(|p| (*first - *p).length2() < EPSILON2) else {
        return false;
    };
    points1
        .iter()
        .enumerate()
        .all(|(i, p)| (*p - points2[wrap_index((i + shift) as isize, points2.len())]).length2() < EPSILON2)
}

/// Hover state, deduplicated candidates and the current selection.
#[derive(Debug, Default)]
pub struct CandidateSet {
    hovered: BTreeSet<EdgeRef>,
    candidates: Vec<Candidate>,
    selected: Option<u64>,
    next_serial: u64,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hovered edge set.
    ///
    /// Edges that left the set are dropped from every candidate, and
    /// candidates left without edges are discarded. Candidates for newly
    /// hovered edges are merged into an existing candidate when they place
    /// the same piece in the same pose, otherwise appended. A selection that
    /// no longer exists moves to the first candidate. Returns `false` when
    /// the set is unchanged.
    pub fn update_hover(&mut self, hovered: BTreeSet<EdgeRef>, pieces: &[Piece], store: &TileStore) -> bool {
        if hovered == self.hovered {
            return false;
        }

        let departed: BTreeSet<EdgeRef> = self.hovered.difference(&hovered).copied().collect();
        for candidate in &mut self.candidates {
            candidate.edges.retain(|e| !departed.contains(e));
        }
        self.candidates.retain(|c| !c.edges.is_empty());

        let arrived: Vec<EdgeRef> = hovered.difference(&self.hovered).copied().collect();
        for edge in arrived {
            for mut found in edge_candidates(pieces, store, edge) {
                let Some(piece) = pieces.get(found.piece.0) else {
                    continue;
                };
                let existing = self
                    .candidates
                    .iter_mut()
                    .find(|c| c.piece == found.piece && shape_equals(piece, &c.transform, &found.transform));
                match existing {
                    Some(c) => {
                        c.edges.insert(edge);
                    }
                    None => {
                        found.serial = self.next_serial;
                        self.next_serial += 1;
                        self.candidates.push(found);
                    }
                }
            }
        }

        if !self.selected.is_some_and(|s| self.candidates.iter().any(|c| c.serial == s)) {
            self.selected = self.candidates.first().map(|c| c.serial);
        }
        self.hovered = hovered;
        true
    }

    /// Move the selection by `step` through the list, wrapping. Returns
    /// `false` when there is nothing to select.
    pub fn cycle(&mut self, step: isize) -> bool {
        if self.candidates.is_empty() {
            return false;
        }
        let current = self.selected_index().map_or(-1, |i| i as isize);
        let next = wrap_index(current + step, self.candidates.len());
        self.selected = Some(self.candidates[next].serial);
        true
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Candidate> {
        let serial = self.selected?;
        self.candidates.iter().find(|c| c.serial == serial)
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        let serial = self.selected?;
        self.candidates.iter().position(|c| c.serial == serial)
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn hovered(&self) -> &BTreeSet<EdgeRef> {
        &self.hovered
    }

    /// Forget hover state, candidates and selection. Called whenever the open
    /// edge set is rebuilt.
    pub fn clear(&mut self) {
        self.hovered.clear();
        self.candidates.clear();
        self.selected = None;
    }
}
