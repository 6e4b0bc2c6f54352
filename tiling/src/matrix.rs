//! 2-D similarity transforms.
//!
//! A [`Matrix`] is the 2×3 affine map `p' = A·p + t`:
//!
//! ```text
//! | m11  m12  m13 |
//! | m21  m22  m23 |
//! ```
//!
//! Placements only ever use rotation, uniform scale and translation. The
//! non-uniform [`Matrix::scale`] exists for edge-widget geometry.

#[cfg(test)]
#[path = "matrix_test.rs"]
mod matrix_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;
use crate::vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self { m11: 1.0, m12: 0.0, m13: 0.0, m21: 0.0, m22: 1.0, m23: 0.0 };

    #[must_use]
    pub fn new(m11: f64, m12: f64, m13: f64, m21: f64, m22: f64, m23: f64) -> Self {
        Self { m11, m12, m13, m21, m22, m23 }
    }

    /// Transform a point (translation included).
    #[must_use]
    pub fn apply(&self, v: Vector) -> Vector {
        Vector {
            x: self.m11 * v.x + self.m12 * v.y + self.m13,
            y: self.m21 * v.x + self.m22 * v.y + self.m23,
        }
    }

    /// Compose transforms: `self.mul(m)` applies `m` first, then `self`.
    #[must_use]
    pub fn mul(&self, m: &Self) -> Self {
        Self {
            m11: self.m11 * m.m11 + self.m12 * m.m21,
            m12: self.m11 * m.m12 + self.m12 * m.m22,
            m13: self.m11 * m.m13 + self.m12 * m.m23 + self.m13,
            m21: self.m21 * m.m11 + self.m22 * m.m21,
            m22: self.m21 * m.m12 + self.m22 * m.m22,
            m23: self.m21 * m.m13 + self.m22 * m.m23 + self.m23,
        }
    }

    /// The linear part with translation stripped.
    #[must_use]
    pub fn rotation(&self) -> Self {
        Self { m13: 0.0, m23: 0.0, ..*self }
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Inverse transform, or `None` when the linear part is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON {
            return None;
        }
        let m11 = self.m22 / det;
        let m12 = -self.m12 / det;
        let m21 = -self.m21 / det;
        let m22 = self.m11 / det;
        Some(Self {
            m11,
            m12,
            m13: -(m11 * self.m13 + m12 * self.m23),
            m21,
            m22,
            m23: -(m21 * self.m13 + m22 * self.m23),
        })
    }

    /// Component-wise equality within [`EPSILON`].
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.m11 - other.m11).abs() < EPSILON
            && (self.m12 - other.m12).abs() < EPSILON
            && (self.m13 - other.m13).abs() < EPSILON
            && (self.m21 - other.m21).abs() < EPSILON
            && (self.m22 - other.m22).abs() < EPSILON
            && (self.m23 - other.m23).abs() < EPSILON
    }

    /// Pure rotation taking the direction of `v1` onto the direction of `v2`.
    ///
    /// Built from the dot and cross products of the normalized inputs, so no
    /// inverse trigonometry (and no branch cut) is involved.
    #[must_use]
    pub fn rotate_vector(v1: Vector, v2: Vector) -> Self {
        let v1 = v1.normalize();
        let v2 = v2.normalize();
        let u = v1.dot(v2);
        let v = v1.cross(v2);
        Self::new(u, -v, 0.0, v, u, 0.0)
    }

    /// Transform taking the oriented line `(p1, d1)` onto `(p2, d2)`: rotate
    /// `d1` onto `d2`, then translate the rotated `p1` onto `p2`.
    #[must_use]
    pub fn rotate_line(p1: Vector, d1: Vector, p2: Vector, d2: Vector) -> Self {
        let m = Self::rotate_vector(d1, d2);
        Self::translate(p2 - m.apply(p1)).mul(&m)
    }

    #[must_use]
    pub fn translate(offset: Vector) -> Self {
        Self::new(1.0, 0.0, offset.x, 0.0, 1.0, offset.y)
    }

    #[must_use]
    pub fn scale(x: f64, y: f64) -> Self {
        Self::new(x, 0.0, 0.0, 0.0, y, 0.0)
    }
}

/// SVG `transform` attribute syntax: `matrix(a, b, c, d, e, f)`.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            self.m11, self.m21, self.m12, self.m22, self.m13, self.m23
        )
    }
}
