//! Profile-constrained triangulation and its repair passes.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::Mesh;
use crate::error::{MeshError, Result, TopologyError};
use crate::topology::{EdgeKey, LoopId, Owner, TriangleId};

impl Mesh {
    /// Triangulate the domain described by the profile loops.
    ///
    /// Loops are processed largest-first. Each cycle retriangulates all
    /// vertices, then optionally strips non-material triangles, recovers lost
    /// boundary edges by splitting, and prunes unbounded triangles. Cycles
    /// repeat while recovery split anything.
    ///
    /// Self-intersecting loops make recovery split without end, roughly
    /// doubling the vertex count per cycle. The total split count is capped at
    /// `max_split_growth` times the loop vertex count at entry; exceeding it
    /// fails with `RunawayGuardTripped`.
    pub fn triangulate_profile(
        &mut self,
        remove_nonmaterial: bool,
        split_loops: bool,
        remove_unbounded: bool,
    ) -> Result<()> {
        if self.profile.is_empty() {
            return Err(MeshError::InsufficientInput {
                required: 1,
                actual: 0,
            });
        }
        self.profile.sort_by_area(&self.vertices);
        let max_cycles = self.cfg().max_repair_cycles;
        let loop_vertices: usize = self.profile.loops().iter().map(|lp| lp.len()).sum();
        let split_budget = self.cfg().max_split_growth.saturating_mul(loop_vertices);
        let mut total_splits = 0usize;
        for cycle in 0..max_cycles {
            self.clear_triangles()?;
            self.clear_unused_edges();
            self.triangulate_vertices()?;
            let nonmaterial = if remove_nonmaterial {
                self.remove_nonmaterial_triangles()?
            } else {
                0
            };
            let splits = if split_loops {
                self.recover_loop_edges_split()?
            } else {
                0
            };
            let unbounded = if remove_unbounded {
                self.remove_unbounded_triangles()?
            } else {
                0
            };
            debug!(cycle, nonmaterial, splits, unbounded, "profile repair cycle");
            total_splits += splits;
            if total_splits > split_budget {
                return Err(MeshError::runaway("triangulate_profile", split_budget));
            }
            if splits == 0 {
                info!(
                    cycles = cycle + 1,
                    vertices = self.vertex_count(),
                    triangles = self.triangle_count(),
                    "triangulate_profile"
                );
                return Ok(());
            }
        }
        Err(MeshError::runaway("triangulate_profile", max_cycles))
    }

    /// Delete triangles on the outside of a profile loop.
    ///
    /// A loop coedge runs along the exterior side of its edge, so a material
    /// triangle uses the same edge in the opposite direction. A triangle that
    /// uses it in the same direction lies outside the material.
    pub fn remove_nonmaterial_triangles(&mut self) -> Result<usize> {
        let mut doomed: BTreeSet<TriangleId> = BTreeSet::new();
        for lp in self.profile.loops() {
            for c in lp.coedges() {
                let Some(edge) = self.edges.get(c.edge()) else {
                    continue;
                };
                for u in edge.users() {
                    if let Owner::Triangle(t) = u.owner {
                        if u.forward == c.forward() {
                            doomed.insert(t);
                        }
                    }
                }
            }
        }
        let n = self.delete_triangles(doomed)?;
        debug!(removed = n, "remove_nonmaterial_triangles");
        Ok(n)
    }

    /// Repeatedly delete triangles that own an edge nobody else uses.
    ///
    /// After material stripping such "dangling" edges only remain on regions
    /// outside every loop; each deletion may expose new ones, so this runs to
    /// a fixed point.
    pub fn remove_unbounded_triangles(&mut self) -> Result<usize> {
        let mut total = 0;
        loop {
            let doomed: Vec<TriangleId> = self
                .triangles
                .iter()
                .filter(|(_, t)| t.edges().iter().any(|&k| self.edges.use_count(k) == 1))
                .map(|(&id, _)| id)
                .collect();
            if doomed.is_empty() {
                break;
            }
            total += self.delete_triangles(doomed)?;
        }
        debug!(removed = total, "remove_unbounded_triangles");
        Ok(total)
    }

    /// Split every loop segment the current triangulation lost.
    ///
    /// A loop coedge whose edge has use count 1 is referenced by the loop alone.
    /// Such a segment is split at its midpoint (`Loop::split_coedge`); the next
    /// retriangulation picks the midpoint up. Returns the number of splits.
    pub fn recover_loop_edges_split(&mut self) -> Result<usize> {
        let ids: Vec<LoopId> = self.profile.loops().iter().map(|lp| lp.id()).collect();
        let mut splits = 0;
        for id in ids {
            let lost: Vec<EdgeKey> = {
                let lp = self.profile.get(id).ok_or(TopologyError::UnknownLoop(id))?;
                lp.coedges()
                    .iter()
                    .map(|c| c.edge())
                    .filter(|&k| self.edges.use_count(k) == 1)
                    .collect()
            };
            for key in lost {
                let lp = self
                    .profile
                    .get_mut(id)
                    .ok_or(TopologyError::UnknownLoop(id))?;
                let Some(index) = lp.position_of(key) else {
                    continue;
                };
                let m = lp.split_coedge(index, &mut self.vertices, &mut self.edges)?;
                debug!(loop_id = id.0, edge = %key, midpoint = m.0, "recovered loop edge by split");
                splits += 1;
            }
        }
        Ok(splits)
    }
}
