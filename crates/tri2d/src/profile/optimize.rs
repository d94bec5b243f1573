//! Polyline simplification for closed loops.

use tracing::debug;

use crate::geom2::{Line2D, Position2D};
use crate::mesh::Mesh;

/// Drops loop points that are both close to their neighbours and nearly on
/// the chord between them.
///
/// A middle point of a consecutive triple `(prev, mid, next)` is kept when
/// `|next − prev| > distance_tolerance` or its perpendicular "arrow" distance
/// to the chord `prev → next` exceeds `arrow_tolerance`. Points are only ever
/// removed, and a loop never shrinks below three points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopOptimizer {
    pub arrow_tolerance: f64,
    pub distance_tolerance: f64,
}

impl LoopOptimizer {
    pub fn new(arrow_tolerance: f64, distance_tolerance: f64) -> Self {
        Self {
            arrow_tolerance,
            distance_tolerance,
        }
    }

    /// Simplify one closed polyline (no repeated closing point).
    ///
    /// Walks the loop with wraparound and stops once two full passes in a row
    /// removed nothing, so removals late in a pass still get re-examined.
    pub fn optimize(&self, points: &[Position2D]) -> Vec<Position2D> {
        let mut pts = points.to_vec();
        let mut i = 0usize;
        let mut kept_in_row = 0usize;
        while pts.len() > 3 && kept_in_row < 2 * pts.len() {
            let n = pts.len();
            let prev = pts[(i + n - 1) % n];
            let mid = pts[i % n];
            let next = pts[(i + 1) % n];
            let outer = (next - prev).norm();
            let arrow = Line2D::new(prev, next).distance_to(&mid, f64::EPSILON);
            if outer > self.distance_tolerance || arrow > self.arrow_tolerance {
                kept_in_row += 1;
                i = (i + 1) % n;
            } else {
                pts.remove(i % n);
                kept_in_row = 0;
                i %= pts.len();
            }
        }
        debug!(before = points.len(), after = pts.len(), "loop optimized");
        pts
    }

    /// Simplified copies of every profile loop of `mesh` (material order).
    pub fn optimize_profile(&self, mesh: &Mesh) -> Vec<Vec<Position2D>> {
        mesh.loop_points().iter().map(|lp| self.optimize(lp)).collect()
    }
}
