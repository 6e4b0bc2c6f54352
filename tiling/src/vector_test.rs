#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Arithmetic ---

#[test]
fn add_and_sub_are_componentwise() {
    let a = Vector::new(1.0, 2.0);
    let b = Vector::new(3.0, -4.0);
    assert_eq!(a + b, Vector::new(4.0, -2.0));
    assert_eq!(a - b, Vector::new(-2.0, 6.0));
}

#[test]
fn scalar_mul_and_neg() {
    let v = Vector::new(1.5, -2.0);
    assert_eq!(v * 2.0, Vector::new(3.0, -4.0));
    assert_eq!(-v, Vector::new(-1.5, 2.0));
}

#[test]
fn dot_of_perpendicular_is_zero() {
    assert_eq!(Vector::new(1.0, 0.0).dot(Vector::new(0.0, 5.0)), 0.0);
}

#[test]
fn cross_sign_follows_turn_direction() {
    let x = Vector::new(1.0, 0.0);
    let y = Vector::new(0.0, 1.0);
    assert_eq!(x.cross(y), 1.0);
    assert_eq!(y.cross(x), -1.0);
    assert_eq!(x.cross(x * 3.0), 0.0);
}

// --- Length / normalize ---

#[test]
fn length_of_3_4_is_5() {
    let v = Vector::new(3.0, 4.0);
    assert_eq!(v.length2(), 25.0);
    assert_eq!(v.length(), 5.0);
}

#[test]
fn normalize_yields_unit_length() {
    let n = Vector::new(3.0, 4.0).normalize();
    assert!(approx_eq(n.length(), 1.0));
    assert!(approx_eq(n.x, 0.6));
    assert!(approx_eq(n.y, 0.8));
}

#[test]
fn normalize_zero_is_nan() {
    let n = Vector::ZERO.normalize();
    assert!(n.x.is_nan());
    assert!(!n.is_finite());
}

#[test]
fn perp_rotates_counter_clockwise() {
    assert_eq!(Vector::new(1.0, 0.0).perp(), Vector::new(0.0, 1.0));
    assert_eq!(Vector::new(2.0, 3.0).dot(Vector::new(2.0, 3.0).perp()), 0.0);
}

#[test]
fn display_format() {
    assert_eq!(Vector::new(1.0, -2.5).to_string(), "(1, -2.5)");
}
