//! In-memory SVG scene.
//!
//! [`SvgScene`] implements [`Surface`] with a z-ordered list of transformed
//! piece outlines. Hit-testing is even-odd ray casting against those
//! outlines, newest first. [`SvgScene::to_document`] writes the placed tiles
//! as a self-contained SVG: piece outlines in `<defs>`, one `<use>` per tile.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::BTreeMap;

use tracing::debug;

use crate::matrix::Matrix;
use crate::piece::Piece;
use crate::surface::{Surface, VisualHandle};
use crate::tile::{Boundary, PieceId};
use crate::vector::Vector;

/// Stroke and fill used by the exported document.
const EXPORT_STYLE: &str = "use{stroke:#222;stroke-width:0.02;vector-effect:non-scaling-stroke}\
.even{fill:#f2d479}.odd{fill:#6d9ecf}";

#[derive(Debug, Clone)]
struct PieceDef {
    name: String,
    path: String,
    boundary: Boundary,
}

#[derive(Debug, Clone)]
struct Visual {
    handle: VisualHandle,
    piece: PieceId,
    transform: Matrix,
    class: String,
    outline: Vec<Vector>,
}

/// Z-ordered scene of piece visuals.
#[derive(Debug, Default)]
pub struct SvgScene {
    defs: BTreeMap<PieceId, PieceDef>,
    visuals: Vec<Visual>,
    next_handle: u64,
}

impl SvgScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visuals currently shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Style class of a visual.
    #[must_use]
    pub fn class_of(&self, handle: VisualHandle) -> Option<&str> {
        self.visuals.iter().find(|v| v.handle == handle).map(|v| v.class.as_str())
    }

    /// Serialize the scene as a standalone SVG document of the given size.
    #[must_use]
    pub fn to_document(&self, width: f64, height: f64) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        );
        out.push_str(&format!("<style>{EXPORT_STYLE}</style>\n"));
        out.push_str("<defs>\n");
        for (id, def) in &self.defs {
            out.push_str(&format!(
                "<path id=\"{}\" data-name=\"{}\" d=\"{}\"/>\n",
                def_id(*id),
                xml_escape(&def.name),
                xml_escape(&def.path)
            ));
        }
        out.push_str("</defs>\n");
        for v in &self.visuals {
            out.push_str(&format!(
                "<use href=\"#{}\" transform=\"{}\" class=\"{}\"/>\n",
                def_id(v.piece),
                v.transform,
                xml_escape(&v.class)
            ));
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgScene {
    fn define_piece(&mut self, piece: &Piece) {
        self.defs.insert(
            piece.id,
            PieceDef { name: piece.name.clone(), path: piece.path.clone(), boundary: piece.boundary.clone() },
        );
    }

    fn create_visual(&mut self, piece: PieceId, transform: &Matrix, class: &str) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        let outline = match self.defs.get(&piece) {
            Some(def) => def.boundary.transformed(transform).points().to_vec(),
            None => {
                debug!(piece = piece.0, handle = handle.0, "visual for undefined piece has no outline");
                Vec::new()
            }
        };
        self.visuals.push(Visual { handle, piece, transform: *transform, class: class.to_owned(), outline });
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.visuals.retain(|v| v.handle != handle);
    }

    fn topmost_shape_at(&self, point: Vector) -> Option<VisualHandle> {
        self.visuals
            .iter()
            .rev()
            .find(|v| poly_contains_point(&v.outline, point))
            .map(|v| v.handle)
    }
}

fn def_id(id: PieceId) -> String {
    format!("piece-{}", id.0)
}

/// Even-odd ray cast.
fn poly_contains_point(poly: &[Vector], p: Vector) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (poly[i], poly[j]);
        let crosses = (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
