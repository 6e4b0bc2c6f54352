//! Shared numeric constants for the tiling crate.

// ── Tolerances ──────────────────────────────────────────────────

/// Coarse tolerance for edge lengths, corner signatures and matrix equality.
pub const EPSILON: f64 = 1e-3;

/// Fine tolerance (squared distance) for detecting duplicate absolute placements.
pub const EPSILON2: f64 = 1e-6;

// ── Editing ─────────────────────────────────────────────────────

/// Default number of propagation passes run after a confirmed placement.
pub const DEFAULT_PROPAGATE: usize = 5;

/// Thickness of an open-edge hover widget, in world units.
pub const EDGE_WIDGET_THICKNESS: f64 = 25.0;

/// Offset along the left normal of edge 0 used to probe tile orientation,
/// as a fraction of the edge length.
pub const DIRECTION_PROBE_OFFSET: f64 = 0.1;

// ── Viewport ────────────────────────────────────────────────────

/// Viewport width used before the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// Viewport height used before the host reports one.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;
