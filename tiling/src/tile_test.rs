#![allow(clippy::float_cmp)]

use super::*;

fn boundary(points: &[(f64, f64)]) -> Boundary {
    Boundary::new(points.iter().map(|&(x, y)| Vector::new(x, y)).collect())
}

fn unit_square() -> Boundary {
    boundary(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

/// Equilateral triangle of side 3 with its corners cut at 0.5: a hexagon whose
/// edges alternate 2 and 0.5 with all turns equal.
fn truncated_triangle() -> Boundary {
    let h = 3.0_f64.sqrt() / 2.0;
    boundary(&[
        (0.5, 0.0),
        (2.5, 0.0),
        (2.75, 0.5 * h),
        (1.75, 2.5 * h),
        (1.25, 2.5 * h),
        (0.25, 0.5 * h),
    ])
}

// =============================================================
// wrap_index
// =============================================================

#[test]
fn wrap_index_handles_negative_and_overflow() {
    assert_eq!(wrap_index(0, 4), 0);
    assert_eq!(wrap_index(5, 4), 1);
    assert_eq!(wrap_index(-1, 4), 3);
    assert_eq!(wrap_index(-9, 4), 3);
}

#[test]
fn empty_tile_accessors_do_not_panic() {
    assert_eq!(wrap_index(3, 0), 0);
    let mut t = Tile::new(TileId(1), PieceId(0), Matrix::IDENTITY, Boundary::new(Vec::new()), Vec::new());
    assert_eq!(t.neighbour(-1), None);
    t.set_neighbour(2, Some(Link { tile: TileId(2), edge: 0 }));
    assert!(t.neighbours.is_empty());
    assert_eq!(t.point(5), Vector::ZERO);
}

// =============================================================
// Boundary accessors
// =============================================================

#[test]
fn point_and_edge_wrap() {
    let b = unit_square();
    assert_eq!(b.point(4), b.point(0));
    assert_eq!(b.point(-1), Vector::new(0.0, 1.0));
    assert_eq!(b.edge(3), Vector::new(0.0, -1.0));
    assert_eq!(b.edge(-1), b.edge(3));
}

#[test]
fn corner_of_square_is_right_angle_left_turn() {
    let b = unit_square();
    for i in 0..4 {
        let c = b.corner(i);
        assert!(c.dot.abs() < 1e-12);
        assert_eq!(c.sign, 1);
    }
}

#[test]
fn corner_sign_is_zero_when_collinear() {
    let b = boundary(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0)]);
    let c = b.corner(1);
    assert_eq!(c.sign, 0);
    assert!((c.dot - 1.0).abs() < 1e-12);
}

#[test]
fn clockwise_boundary_turns_right() {
    let b = boundary(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    assert_eq!(b.corner(0).sign, -1);
}

#[test]
fn center_is_vertex_average() {
    let b = boundary(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]);
    assert_eq!(b.center(), Vector::new(2.0, 1.0));
}

#[test]
fn transformed_maps_every_point() {
    let b = unit_square().transformed(&Matrix::translate(Vector::new(3.0, 4.0)));
    assert_eq!(b.point(0), Vector::new(3.0, 4.0));
    assert_eq!(b.point(2), Vector::new(4.0, 5.0));
}

// =============================================================
// Corner predicates
// =============================================================

#[test]
fn right_angles_supplement_each_other() {
    let a = Corner { dot: 0.0, sign: 1 };
    let b = Corner { dot: 0.0005, sign: 1 };
    assert!(a.supplements(&b));
    assert!(!a.supplements(&Corner { dot: 0.0, sign: -1 }));
    assert!(!Corner { dot: 0.0, sign: -1 }.supplements(&Corner { dot: 0.0, sign: -1 }));
}

#[test]
fn mirrored_corners_have_equal_dot_and_opposite_sign() {
    let a = Corner { dot: 0.5, sign: 1 };
    assert!(a.mirrors(&Corner { dot: 0.5, sign: -1 }));
    assert!(!a.mirrors(&Corner { dot: 0.5, sign: 1 }));
    assert!(!a.mirrors(&Corner { dot: -0.5, sign: -1 }));
}

#[test]
fn corner_predicates_exclude_the_tolerance_bound() {
    let a = Corner { dot: 0.0, sign: 1 };
    assert!(!a.supplements(&Corner { dot: EPSILON, sign: 1 }));
    assert!(!a.mirrors(&Corner { dot: EPSILON, sign: -1 }));
    assert!(!a.matches(&Corner { dot: EPSILON, sign: 1 }));
    assert!(a.matches(&Corner { dot: EPSILON / 2.0, sign: 1 }));
}

// =============================================================
// Canonical prefix (deduplicate)
// =============================================================

#[test]
fn square_canonical_prefix_is_one_vertex() {
    let b = unit_square();
    assert_eq!(b.canonical_len(), 1);
    assert_eq!(b.canonical_points(), &[Vector::new(0.0, 0.0)]);
}

#[test]
fn rectangle_canonical_prefix_is_two_vertices() {
    let b = boundary(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
    assert_eq!(b.canonical_len(), 2);
}

#[test]
fn truncated_triangle_has_period_two() {
    assert_eq!(truncated_triangle().canonical_len(), 2);
}

#[test]
fn asymmetric_quad_keeps_full_boundary() {
    let b = boundary(&[(0.0, 0.0), (3.0, 0.0), (2.0, 1.0), (0.0, 2.0)]);
    assert_eq!(b.canonical_len(), 4);
    assert_eq!(b.canonical_points().len(), 4);
}

#[test]
fn canonical_prefix_re_expands_to_boundary() {
    for b in [unit_square(), truncated_triangle()] {
        let k = b.canonical_len();
        let n = b.len();
        assert_eq!(n % k, 0);
        for j in 0..n {
            let r = (j % k) as isize;
            let j = j as isize;
            assert!((b.edge(j).length() - b.edge(r).length()).abs() <= EPSILON);
            assert!(b.corner(j).matches(&b.corner(r)));
        }
    }
}

// =============================================================
// Tile
// =============================================================

#[test]
fn tile_new_computes_canonical_len_and_defaults() {
    let t = Tile::new(TileId(7), PieceId(0), Matrix::IDENTITY, unit_square(), vec![None; 4]);
    assert_eq!(t.canonical_len, 1);
    assert_eq!(t.parity, 0);
    assert_eq!(t.direction, Direction::Back);
    assert_eq!(t.open_edges(), vec![0, 1, 2, 3]);
}

#[test]
fn tile_neighbour_slots_wrap() {
    let mut t = Tile::new(TileId(1), PieceId(0), Matrix::IDENTITY, unit_square(), vec![None; 4]);
    let link = Link { tile: TileId(2), edge: 3 };
    t.set_neighbour(-1, Some(link));
    assert_eq!(t.neighbour(3), Some(link));
    assert_eq!(t.neighbour(7), Some(link));
    assert_eq!(t.open_edges(), vec![0, 1, 2]);
    t.set_neighbour(3, None);
    assert!(t.neighbour(-1).is_none());
}

#[test]
fn direction_probe_sits_left_of_edge_zero() {
    let t = Tile::new(TileId(1), PieceId(0), Matrix::IDENTITY, unit_square(), vec![None; 4]);
    let p = t.direction_probe();
    assert!((p.x - 0.5).abs() < 1e-12);
    assert!((p.y - 0.1).abs() < 1e-12);
}

#[test]
fn direction_sign() {
    assert_eq!(Direction::Front.sign(), 1);
    assert_eq!(Direction::Back.sign(), -1);
}

#[test]
fn tile_serde_round_trip() {
    let mut t = Tile::new(TileId(3), PieceId(1), Matrix::translate(Vector::new(1.0, 2.0)), unit_square(), vec![None; 4]);
    t.set_neighbour(0, Some(Link { tile: TileId(1), edge: 2 }));
    let json = serde_json::to_string(&t).expect("serialize");
    let back: Tile = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, t);
}

#[test]
fn tile_id_display() {
    assert_eq!(TileId(12).to_string(), "t12");
}
