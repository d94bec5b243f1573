//! Bowyer-Watson point insertion.
//!
//! Every mutating algorithm in this crate reduces to this primitive: delete the
//! triangles whose circumcircle contains the new point, then re-fan the cavity
//! boundary from the new vertex.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::debug;

use super::Mesh;
use crate::error::{Result, TopologyError};
use crate::geom2::{triangle_signed_area, Position2D};
use crate::topology::{EdgeKey, TriangleId, VertexId};

impl Mesh {
    /// Insert an existing vertex into the current triangulation.
    ///
    /// Returns `Ok(false)` when the vertex was skipped: either no circumcircle
    /// contains it, or it coincides (within tolerance) with a cavity vertex.
    /// Super-triangle slots and indices past the vertex array are rejected
    /// with `VertexOutOfRange`.
    pub fn bowyer_watson(&mut self, v: VertexId) -> Result<bool> {
        if Self::is_super(v) || v.0 >= self.vertices.len() {
            return Err(TopologyError::VertexOutOfRange {
                index: v.0,
                count: self.vertices.len(),
            }
            .into());
        }
        let p = self.position(v);
        let tol = self.cfg().coincidence_tolerance;

        let bad: Vec<TriangleId> = self
            .triangles
            .iter()
            .filter(|(_, t)| t.circle().contains(&p, tol))
            .map(|(&id, _)| id)
            .collect();
        if bad.is_empty() {
            debug!(vertex = v.0, "no circumcircle contains point; skipped");
            return Ok(false);
        }
        let bad = self.connected_cavity(&bad, &p);

        for id in &bad {
            if let Some(t) = self.triangles.get(id) {
                if t.vertices().iter().any(|&w| (self.position(w) - p).norm() <= tol) {
                    debug!(vertex = v.0, "coincides with an existing vertex; skipped");
                    return Ok(false);
                }
            }
        }

        // Cavity boundary = edges used by exactly one bad triangle, taken in
        // that triangle's (CCW) direction. Edges seen twice are cavity-interior.
        let mut seen: BTreeMap<EdgeKey, (usize, VertexId, VertexId)> = BTreeMap::new();
        for id in &bad {
            if let Some(t) = self.triangles.get(id) {
                for c in t.coedges() {
                    seen.entry(c.edge())
                        .and_modify(|e| e.0 += 1)
                        .or_insert((1, c.vertex1(), c.vertex2()));
                }
            }
        }
        for id in &bad {
            self.delete_triangle(*id)?;
        }

        let mut contour = Vec::new();
        for (key, (count, a, b)) in seen {
            if count == 1 {
                contour.push((a, b));
            } else {
                self.edges.remove_if_unused(key);
            }
        }
        for &(a, b) in &contour {
            self.create_triangle(a, b, v);
        }
        debug!(
            vertex = v.0,
            removed = bad.len(),
            created = contour.len(),
            "bowyer_watson"
        );
        Ok(true)
    }

    /// Append a vertex and insert it immediately. Returns its public index.
    pub fn insert_point(&mut self, p: Position2D) -> Result<usize> {
        let v = self.push_vertex(p);
        self.bowyer_watson(v)?;
        Ok(self.external(v))
    }

    /// Restrict the bad set to the edge-connected component around the
    /// triangle(s) containing `p`. In a full Delaunay triangulation the bad set
    /// is already connected; on partial meshes (after material stripping) this
    /// keeps the cavity star-shaped.
    fn connected_cavity(&self, bad: &[TriangleId], p: &Position2D) -> Vec<TriangleId> {
        let tol = self.cfg().coincidence_tolerance;
        let bad_set: BTreeSet<TriangleId> = bad.iter().copied().collect();
        let seeds: Vec<TriangleId> = bad
            .iter()
            .copied()
            .filter(|&id| self.triangle_contains(id, p, tol))
            .collect();
        if seeds.is_empty() {
            return bad.to_vec();
        }
        let mut keep: BTreeSet<TriangleId> = seeds.iter().copied().collect();
        let mut queue: VecDeque<TriangleId> = seeds.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let Some(t) = self.triangles.get(&id) else {
                continue;
            };
            for key in t.edges() {
                for (other, _) in self.triangles_on_edge(key) {
                    if bad_set.contains(&other) && keep.insert(other) {
                        queue.push_back(other);
                    }
                }
            }
        }
        keep.into_iter().collect()
    }

    /// Point-in-triangle with slack `tol` on each barycentric sign test.
    pub(crate) fn triangle_contains(&self, id: TriangleId, p: &Position2D, tol: f64) -> bool {
        let Some([a, b, c]) = self.triangle_positions(id) else {
            return false;
        };
        let area = triangle_signed_area(&a, &b, &c);
        if area <= 0.0 {
            return false;
        }
        let slack = -tol * area.sqrt().max(1.0);
        triangle_signed_area(&a, &b, p) >= slack
            && triangle_signed_area(&b, &c, p) >= slack
            && triangle_signed_area(&c, &a, p) >= slack
    }
}
