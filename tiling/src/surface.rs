//! Rendering collaborator interface.
//!
//! The session never draws anything itself. It asks a [`Surface`] to show
//! and hide tile visuals, and to report which visual is topmost at a point;
//! the latter is how tile orientation is resolved.

use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;
use crate::piece::Piece;
use crate::tile::PieceId;
use crate::vector::Vector;

/// Opaque handle to a visual owned by a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Capabilities the editor needs from whatever displays the tiling.
pub trait Surface {
    /// Register a piece outline so visuals can reference it.
    fn define_piece(&mut self, piece: &Piece);

    /// Show `piece` under `transform` with a style class, on top of every
    /// existing visual.
    fn create_visual(&mut self, piece: PieceId, transform: &Matrix, class: &str) -> VisualHandle;

    /// Hide a visual. Unknown handles are ignored.
    fn remove_visual(&mut self, handle: VisualHandle);

    /// The topmost visual whose shape contains `point`.
    fn topmost_shape_at(&self, point: Vector) -> Option<VisualHandle>;
}
