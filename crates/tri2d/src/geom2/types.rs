//! Position/vector aliases and the handful of vector helpers nalgebra lacks in 2D.

use nalgebra::{Point2, Vector2};

/// Affine position in the plane.
pub type Position2D = Point2<f64>;
/// Displacement in the plane.
pub type Vector2D = Vector2<f64>;

/// Shorthand constructor used throughout tests and call sites.
#[inline]
pub fn pos(x: f64, y: f64) -> Position2D {
    Point2::new(x, y)
}

/// 2D cross product (z-component of the 3D cross): positive when `b` is CCW of `a`.
#[inline]
pub fn cross(a: &Vector2D, b: &Vector2D) -> f64 {
    a.perp(b)
}

/// Signed angle from `a` to `b` in (-π, π].
#[inline]
pub fn angle_between(a: &Vector2D, b: &Vector2D) -> f64 {
    cross(a, b).atan2(a.dot(b))
}

/// Unit vector along `v`, or `None` when `|v| <= tol` (zero-length guard).
#[inline]
pub fn try_normalize(v: &Vector2D, tol: f64) -> Option<Vector2D> {
    v.try_normalize(tol.max(0.0))
}

/// Signed area of triangle `(a, b, c)`; positive for CCW.
#[inline]
pub fn triangle_signed_area(a: &Position2D, b: &Position2D, c: &Position2D) -> f64 {
    0.5 * cross(&(b - a), &(c - a))
}

/// Shoelace area of a closed polyline (last point connects to first); positive for CCW.
pub fn polygon_signed_area(points: &[Position2D]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}
