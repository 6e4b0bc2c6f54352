//! Interactive edge-to-edge tiling editor core.
//!
//! A user registers polygonal prototile shapes ("pieces"), seeds a tiling
//! with one of them, and grows it by hovering open edges and confirming one
//! of the candidate placements that fit there. The crate owns the tiling
//! topology, candidate enumeration, undo/redo history and neighbour
//! propagation; drawing and hit-testing of placed shapes go through the
//! [`surface::Surface`] trait so the host decides how tiles appear.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor session: event handling, placement, propagation |
//! | [`doc`] | Tile store with symmetric neighbour links |
//! | [`tile`] | Placed tiles, boundaries and corner signatures |
//! | [`piece`] | Prototiles: path parsing and the edge-matching test |
//! | [`candidate`] | Candidate enumeration, deduplication and selection |
//! | [`history`] | Undo/redo stacks of invertible commands |
//! | [`hit`] | Open-edge widgets and pointer hit-testing |
//! | [`input`] | Input event types and keyboard shortcuts |
//! | [`surface`] | Drawing/hit-testing abstraction for placed tiles |
//! | [`render`] | In-memory SVG surface and document export |
//! | [`path`] | SVG path-data parsing |
//! | [`vector`] / [`matrix`] | 2D geometry |
//! | [`consts`] | Shared tolerances and defaults |

pub mod candidate;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod history;
pub mod input;
pub mod matrix;
pub mod path;
pub mod piece;
pub mod render;
pub mod surface;
pub mod tile;
pub mod vector;
