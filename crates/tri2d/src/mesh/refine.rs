//! Area refinement and long-edge splitting/flipping.
//!
//! Conventions
//! - Both passes are bounded by guards from `MeshCfg`; hitting a guard is an
//!   error (`RunawayGuardTripped`), never a silent partial result.
//! - Selection is deterministic: ties resolve to the lowest triangle id / edge key.

use std::cmp::Ordering;

use tracing::{debug, info};

use super::Mesh;
use crate::error::{MeshError, Result, TopologyError};
use crate::geom2::{triangle_signed_area, Line2D, Position2D};
use crate::topology::{EdgeKey, LoopId, TriangleId, VertexId};

/// Minimum barycentric share a refinement point must keep from each edge.
const INTERIOR_MARGIN: f64 = 1e-3;

/// Neighbourhood of an edge selected for flipping or splitting.
enum EdgeSite {
    /// Two triangles share the edge; `c` and `d` are their opposite vertices.
    Interior {
        tris: [TriangleId; 2],
        c: VertexId,
        d: VertexId,
    },
    /// A single triangle uses the edge; `lp` is the profile loop using it, if any.
    Boundary {
        tri: TriangleId,
        c: VertexId,
        lp: Option<LoopId>,
    },
}

impl Mesh {
    /// Insert refinement vertices until no triangle's area exceeds `area_limit`.
    ///
    /// Each candidate lies on the segment from a triangle's centroid
    /// (`bias = 0`) to its circumcenter (`bias = 1`); candidates outside their
    /// triangle fall back to the centroid. Without a profile, candidates go in
    /// by Bowyer-Watson one at a time. With a profile, every round's candidates
    /// are appended and the profile is retriangulated with the given repair
    /// flags, so boundary recovery stays intact. Returns the number of vertices
    /// inserted.
    pub fn triangulate_refine_area(
        &mut self,
        area_limit: f64,
        bias: f64,
        remove_nonmaterial: bool,
        split_loops: bool,
        remove_unbounded: bool,
    ) -> Result<usize> {
        if !(area_limit.is_finite() && area_limit > 0.0) {
            return Err(MeshError::invalid_param(
                "area_limit",
                area_limit,
                "must be finite and positive",
            ));
        }
        if !(0.0..=1.0).contains(&bias) {
            return Err(MeshError::invalid_param("bias", bias, "must lie in [0, 1]"));
        }
        let constrained = !self.profile.is_empty();
        if self.triangles.is_empty() {
            if constrained {
                self.triangulate_profile(remove_nonmaterial, split_loops, remove_unbounded)?;
            } else {
                self.triangulate_vertices()?;
            }
        }

        let limit = self.cfg().max_refine_insertions;
        let mut inserted = 0usize;
        let mut rounds = 0usize;
        loop {
            let mut oversized: Vec<(TriangleId, f64)> = self
                .triangles
                .keys()
                .filter_map(|&id| self.triangle_area(id).map(|a| (id, a)))
                .filter(|&(_, a)| a > area_limit)
                .collect();
            if oversized.is_empty() {
                break;
            }
            // Largest first; stable sort keeps id order among equal areas.
            oversized.sort_by(|x, y| y.1.partial_cmp(&x.1).unwrap_or(Ordering::Equal));
            rounds += 1;

            if constrained {
                for &(id, _) in &oversized {
                    if inserted >= limit {
                        return Err(MeshError::runaway("triangulate_refine_area", limit));
                    }
                    if let Some(p) = self.refinement_point(id, bias) {
                        self.push_vertex(p);
                        inserted += 1;
                    }
                }
                self.triangulate_profile(remove_nonmaterial, split_loops, remove_unbounded)?;
            } else {
                // Only the largest: insertion changes its neighbours.
                let (id, area) = oversized[0];
                if inserted >= limit {
                    return Err(MeshError::runaway("triangulate_refine_area", limit));
                }
                let p = self
                    .refinement_point(id, bias)
                    .ok_or(TopologyError::UnknownTriangle(id))?;
                let v = self.push_vertex(p);
                inserted += 1;
                if !self.bowyer_watson(v)? {
                    debug!(triangle = id.0, area, "refinement point rejected");
                }
            }
        }
        info!(inserted, rounds, triangles = self.triangle_count(), "triangulate_refine_area");
        Ok(inserted)
    }

    /// Centroid/circumcenter blend for triangle `id`, kept inside the triangle.
    fn refinement_point(&self, id: TriangleId, bias: f64) -> Option<Position2D> {
        let [a, b, c] = self.triangle_positions(id)?;
        let centroid = Position2D::from((a.coords + b.coords + c.coords) / 3.0);
        let circle = self.triangles.get(&id)?.circle();
        if circle.is_unbounded() {
            return Some(centroid);
        }
        let candidate = centroid + (circle.center - centroid) * bias;
        // Interior with margin: a point on an edge would fan a zero-area triangle.
        let area = triangle_signed_area(&a, &b, &c);
        let margin = INTERIOR_MARGIN * area;
        let inside = triangle_signed_area(&a, &b, &candidate) > margin
            && triangle_signed_area(&b, &c, &candidate) > margin
            && triangle_signed_area(&c, &a, &candidate) > margin;
        Some(if inside { candidate } else { centroid })
    }

    /// Shorten every eligible edge longer than `max_length`.
    ///
    /// The longest eligible edge is handled first. An interior edge is flipped
    /// when the opposite diagonal is shorter and the quad is convex; otherwise
    /// it is split at the crossing of the two diagonals (area-weighted between
    /// the opposite vertices, or the edge midpoint for a non-convex quad) and
    /// four triangles are rebuilt. A boundary edge is split at its midpoint;
    /// when a profile loop uses it, the loop coedge is split too. Returns the
    /// number of splits (flips are not counted).
    pub fn split_long_edges(&mut self, max_length: f64) -> Result<usize> {
        if !(max_length.is_finite() && max_length > 0.0) {
            return Err(MeshError::invalid_param(
                "max_length",
                max_length,
                "must be finite and positive",
            ));
        }
        let guard = self.cfg().max_split_iterations;
        let mut splits = 0usize;
        let mut flips = 0usize;
        for _ in 0..guard {
            let Some((key, site)) = self.longest_eligible_edge(max_length) else {
                info!(splits, flips, "split_long_edges");
                return Ok(splits);
            };
            match site {
                EdgeSite::Interior { tris, c, d } => {
                    if self.try_flip(key, tris, c, d)? {
                        flips += 1;
                    } else {
                        self.split_interior(key, tris, c, d)?;
                        splits += 1;
                    }
                }
                EdgeSite::Boundary { tri, c, lp } => {
                    self.split_boundary(key, tri, c, lp)?;
                    splits += 1;
                }
            }
        }
        Err(MeshError::runaway("split_long_edges", guard))
    }

    fn longest_eligible_edge(&self, max_length: f64) -> Option<(EdgeKey, EdgeSite)> {
        let mut best: Option<(EdgeKey, f64)> = None;
        for e in self.edges.iter() {
            let tris = e.triangle_use_count();
            let loops = e.loop_use_count();
            let eligible = (tris == 2 && loops == 0) || (tris == 1 && loops <= 1);
            if !eligible {
                continue;
            }
            let len = self.edge_length(e.key());
            if len > max_length && best.map_or(true, |(_, l)| len > l) {
                best = Some((e.key(), len));
            }
        }
        let (key, _) = best?;
        let edge = self.edges.get(key)?;
        let opposite = |t: TriangleId| self.triangles.get(&t)?.opposite_vertex(key);
        let users: Vec<TriangleId> = edge.triangle_users().map(|(t, _)| t).collect();
        let site = match users.as_slice() {
            &[t1, t2] => EdgeSite::Interior {
                tris: [t1, t2],
                c: opposite(t1)?,
                d: opposite(t2)?,
            },
            &[t] => EdgeSite::Boundary {
                tri: t,
                c: opposite(t)?,
                lp: edge.users().iter().find_map(|u| u.owner.as_loop()),
            },
            _ => return None,
        };
        Some((key, site))
    }

    /// Replace diagonal `key` by `c`–`d` if that is shorter and the quad is convex.
    fn try_flip(&mut self, key: EdgeKey, tris: [TriangleId; 2], c: VertexId, d: VertexId) -> Result<bool> {
        let (a, b) = (key.lo(), key.hi());
        let (pa, pb, pc, pd) = (self.position(a), self.position(b), self.position(c), self.position(d));
        if (pd - pc).norm() >= (pb - pa).norm() || self.edges.find(c, d).is_some() {
            return Ok(false);
        }
        let sa = triangle_signed_area(&pc, &pd, &pa);
        let sb = triangle_signed_area(&pc, &pd, &pb);
        let tol = self.cfg().coincidence_tolerance;
        if !(sa * sb < 0.0 && sa.abs() > tol && sb.abs() > tol) {
            return Ok(false);
        }
        self.delete_triangles(tris)?;
        self.create_triangle(a, c, d);
        self.create_triangle(b, d, c);
        debug!(edge = %key, c = c.0, d = d.0, "flipped edge");
        Ok(true)
    }

    fn split_interior(&mut self, key: EdgeKey, tris: [TriangleId; 2], c: VertexId, d: VertexId) -> Result<()> {
        let (a, b) = (key.lo(), key.hi());
        let (pa, pb, pc, pd) = (self.position(a), self.position(b), self.position(c), self.position(d));
        let tol = self.cfg().coincidence_tolerance;
        let area_c = triangle_signed_area(&pa, &pb, &pc).abs();
        let area_d = triangle_signed_area(&pa, &pb, &pd).abs();
        let ab = Line2D::new(pa, pb);
        let weighted = pc + (pd - pc) * (area_c / (area_c + area_d));
        let (t, _) = ab.project(&weighted, tol);
        let on_edge = ab.distance_to(&weighted, tol) <= tol * ab.length().max(1.0);
        let p = if on_edge && t > 0.05 && t < 0.95 {
            weighted
        } else {
            ab.midpoint()
        };

        self.delete_triangles(tris)?;
        let m = self.push_vertex(p);
        for (u, w) in [(a, c), (c, b), (b, d), (d, a)] {
            self.create_triangle(u, w, m);
        }
        debug!(edge = %key, vertex = m.0, "split interior edge");
        Ok(())
    }

    fn split_boundary(
        &mut self,
        key: EdgeKey,
        tri: TriangleId,
        c: VertexId,
        lp: Option<LoopId>,
    ) -> Result<()> {
        let (a, b) = (key.lo(), key.hi());
        let touched = self.delete_triangle(tri)?;
        let m = match lp {
            Some(id) => {
                let lp = self
                    .profile
                    .get_mut(id)
                    .ok_or(TopologyError::UnknownLoop(id))?;
                let index = lp.position_of(key).ok_or(TopologyError::MissingEdge {
                    v1: a.0,
                    v2: b.0,
                })?;
                lp.split_coedge(index, &mut self.vertices, &mut self.edges)?
            }
            None => {
                let mid = Line2D::new(self.position(a), self.position(b)).midpoint();
                self.push_vertex(mid)
            }
        };
        self.create_triangle(a, m, c);
        self.create_triangle(m, b, c);
        for k in touched {
            self.edges.remove_if_unused(k);
        }
        debug!(edge = %key, vertex = m.0, on_loop = lp.is_some(), "split boundary edge");
        Ok(())
    }
}
