//! Open-edge widgets and pointer hit-testing against them.
//!
//! Each open edge gets an elliptical widget: a unit-diameter circle centred at
//! `(0.5, 0)` in widget space, stretched along the edge to its length and
//! across it to [`EDGE_WIDGET_THICKNESS`]. Hit-testing maps the pointer back
//! into widget space and tests against the unit circle.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::consts::EDGE_WIDGET_THICKNESS;
use crate::matrix::Matrix;
use crate::tile::{EdgeRef, Tile};
use crate::vector::Vector;

/// Hover target for one open edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeWidget {
    pub edge: EdgeRef,
    /// Widget space to tiling space.
    pub transform: Matrix,
    /// No active piece fits this edge.
    pub impossible: bool,
}

impl EdgeWidget {
    /// Widget for edge `i` of `tile`.
    #[must_use]
    pub fn new(tile: &Tile, i: usize) -> Self {
        let point = tile.point(i as isize);
        let edge = tile.edge(i as isize);
        let transform = Matrix::translate(point)
            .mul(&Matrix::rotate_vector(Vector::new(1.0, 0.0), edge))
            .mul(&Matrix::scale(edge.length(), EDGE_WIDGET_THICKNESS));
        Self { edge: EdgeRef { tile: tile.id, edge: i }, transform, impossible: false }
    }

    /// Whether `p` falls inside the widget ellipse, boundary included.
    #[must_use]
    pub fn contains(&self, p: Vector) -> bool {
        let Some(inverse) = self.transform.inverse() else {
            return false;
        };
        let q = inverse.apply(p) - Vector::new(0.5, 0.0);
        q.length2() <= 0.25
    }
}

/// Every widget under `p`. Overlapping widgets (concave pockets) all count.
#[must_use]
pub fn edges_at(widgets: &[EdgeWidget], p: Vector) -> BTreeSet<EdgeRef> {
    widgets.iter().filter(|w| w.contains(p)).map(|w| w.edge).collect()
}
