use super::types::{Position2D, Vector2D};

/// Axis-aligned bounding box grown one point at a time.
///
/// Invariant: empty iff `min.x > max.x` (the `new()` state).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox2D {
    pub min: Position2D,
    pub max: Position2D,
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox2D {
    #[inline]
    pub fn new() -> Self {
        Self {
            min: Position2D::new(f64::INFINITY, f64::INFINITY),
            max: Position2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Position2D>) -> Self {
        let mut b = Self::new();
        for p in points {
            b.extend(p);
        }
        b
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    #[inline]
    pub fn extend(&mut self, p: &Position2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&mut self, other: &BoundingBox2D) {
        if !other.is_empty() {
            self.extend(&other.min);
            self.extend(&other.max);
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.x - self.min.x
        }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.y - self.min.y
        }
    }

    /// Largest side length.
    #[inline]
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }

    #[inline]
    pub fn size(&self) -> Vector2D {
        Vector2D::new(self.width(), self.height())
    }

    pub fn center(&self) -> Position2D {
        if self.is_empty() {
            return Position2D::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    pub fn contains(&self, p: &Position2D, tol: f64) -> bool {
        !self.is_empty()
            && p.x >= self.min.x - tol
            && p.x <= self.max.x + tol
            && p.y >= self.min.y - tol
            && p.y <= self.max.y + tol
    }
}
