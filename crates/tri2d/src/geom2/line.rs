//! Parametric segment `p(t) = start + t·(end − start)`.

use super::types::{cross, Position2D, Vector2D};

/// Directed line through `start` and `end`; `t ∈ [0,1]` spans the segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line2D {
    pub start: Position2D,
    pub end: Position2D,
}

/// Result of intersecting two lines: parameters on each line and the point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineIntersection {
    pub t: f64,
    pub u: f64,
    pub point: Position2D,
}

impl LineIntersection {
    /// Both parameters lie within the closed segments (with slack `tol`).
    #[inline]
    pub fn within_segments(&self, tol: f64) -> bool {
        (-tol..=1.0 + tol).contains(&self.t) && (-tol..=1.0 + tol).contains(&self.u)
    }
}

impl Line2D {
    #[inline]
    pub fn new(start: Position2D, end: Position2D) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> Vector2D {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Position2D {
        self.point_at(0.5)
    }

    /// Parametric interpolation.
    #[inline]
    pub fn point_at(&self, t: f64) -> Position2D {
        self.start + self.direction() * t
    }

    /// Orthogonal projection of `p` onto the infinite line: `(t, foot)`.
    ///
    /// Degenerate lines (`|d|² <= tol`) project everything onto `start` with `t = 0`.
    pub fn project(&self, p: &Position2D, tol: f64) -> (f64, Position2D) {
        let d = self.direction();
        let len2 = d.norm_squared();
        if len2 <= tol {
            return (0.0, self.start);
        }
        let t = (p - self.start).dot(&d) / len2;
        (t, self.point_at(t))
    }

    /// Perpendicular distance from `p` to the infinite line.
    pub fn distance_to(&self, p: &Position2D, tol: f64) -> f64 {
        let (_, foot) = self.project(p, tol);
        (p - foot).norm()
    }

    /// Intersection of the two infinite lines; `None` if (near) parallel.
    pub fn intersect(&self, other: &Line2D, tol: f64) -> Option<LineIntersection> {
        let r = self.direction();
        let s = other.direction();
        let denom = cross(&r, &s);
        if denom.abs() <= tol * r.norm() * s.norm() || denom == 0.0 {
            return None;
        }
        let qp = other.start - self.start;
        let t = cross(&qp, &s) / denom;
        let u = cross(&qp, &r) / denom;
        Some(LineIntersection {
            t,
            u,
            point: self.point_at(t),
        })
    }
}
