//! Circumcircles and the in-circle predicate used by Bowyer-Watson.

use super::types::{cross, Position2D};

/// Circle given by center and radius.
///
/// A degenerate circumcircle (collinear input) is represented with an infinite
/// radius so that it contains every point; such triangles are always "bad" for
/// the next insertion and get re-fanned away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle2D {
    pub center: Position2D,
    pub radius: f64,
}

impl Circle2D {
    #[inline]
    pub fn new(center: Position2D, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circumcircle of `(a, b, c)`; `None` for collinear points.
    pub fn circumcircle(a: &Position2D, b: &Position2D, c: &Position2D) -> Option<Self> {
        // Work relative to `a` to keep magnitudes small.
        let ab = b - a;
        let ac = c - a;
        let d = 2.0 * cross(&ab, &ac);
        if d == 0.0 {
            return None;
        }
        let ab2 = ab.norm_squared();
        let ac2 = ac.norm_squared();
        let ux = (ac.y * ab2 - ab.y * ac2) / d;
        let uy = (ab.x * ac2 - ac.x * ab2) / d;
        if !(ux.is_finite() && uy.is_finite()) {
            return None;
        }
        let center = Position2D::new(a.x + ux, a.y + uy);
        Some(Self {
            center,
            radius: ux.hypot(uy),
        })
    }

    /// Circumcircle, falling back to an unbounded circle centred on the centroid.
    pub fn circumcircle_or_unbounded(a: &Position2D, b: &Position2D, c: &Position2D) -> Self {
        Self::circumcircle(a, b, c).unwrap_or_else(|| Self {
            center: Position2D::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0),
            radius: f64::INFINITY,
        })
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        !self.radius.is_finite()
    }

    /// Inclusive containment: `|p − c| <= r + tol`.
    #[inline]
    pub fn contains(&self, p: &Position2D, tol: f64) -> bool {
        self.is_unbounded() || (p - self.center).norm() <= self.radius + tol
    }

    /// Strict containment: `|p − c| < r − tol`.
    #[inline]
    pub fn contains_strict(&self, p: &Position2D, tol: f64) -> bool {
        self.is_unbounded() || (p - self.center).norm() < self.radius - tol
    }
}
