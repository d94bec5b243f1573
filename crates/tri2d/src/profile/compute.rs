//! Boundary reconstruction: rebuild profile loops from a mesh's open edges.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use super::Profile;
use crate::error::{MeshError, Result, TopologyError};
use crate::mesh::Mesh;
use crate::topology::{EdgeKey, Loop, VertexId};

impl Profile {
    /// Replace `mesh`'s profile with the loops formed by its open edges.
    ///
    /// Every edge used by exactly one triangle is a boundary edge. Loops run in
    /// the exterior orientation (opposite to the triangle using the edge), so
    /// the rebuilt profile reads as outer boundaries CCW and holes CW in
    /// material order. Returns the number of loops.
    ///
    /// Errors: `JunctionVertex` if a boundary vertex does not have exactly two
    /// boundary edges, `UnclosedLoop` if a walk revisits an edge before
    /// returning to its start, `RunawayGuardTripped` if a walk runs too long.
    pub fn compute(mesh: &mut Mesh) -> Result<usize> {
        mesh.clear_profile()?;

        // Exterior-directed boundary edges: (key, from, to).
        let boundary: Vec<(EdgeKey, VertexId, VertexId)> = mesh
            .edges
            .iter()
            .filter(|e| e.use_count() == 1)
            .filter_map(|e| {
                let (_, forward) = e.triangle_users().next()?;
                let (lo, hi) = (e.v1(), e.v2());
                Some(if forward { (e.key(), hi, lo) } else { (e.key(), lo, hi) })
            })
            .collect();

        let mut incident: BTreeMap<VertexId, Vec<EdgeKey>> = BTreeMap::new();
        for &(key, a, b) in &boundary {
            incident.entry(a).or_default().push(key);
            incident.entry(b).or_default().push(key);
        }
        if let Some((&v, keys)) = incident.iter().find(|(_, keys)| keys.len() != 2) {
            return Err(TopologyError::JunctionVertex {
                vertex: mesh.external(v),
                degree: keys.len(),
            }
            .into());
        }

        let guard = mesh.cfg().loop_walk_factor * boundary.len() + 16;
        let mut visited: BTreeSet<EdgeKey> = BTreeSet::new();
        let mut paths: Vec<Vec<VertexId>> = Vec::new();
        for &(key, start, next) in &boundary {
            if !visited.insert(key) {
                continue;
            }
            let mut path = vec![start];
            let (mut cur, mut prev) = (next, key);
            let mut steps = 0usize;
            while cur != start {
                steps += 1;
                if steps > guard {
                    return Err(MeshError::runaway("Profile::compute", guard));
                }
                path.push(cur);
                let edge = incident
                    .get(&cur)
                    .and_then(|keys| keys.iter().copied().find(|&k| k != prev))
                    .ok_or(TopologyError::UnclosedLoop {
                        start: mesh.external(start),
                        steps,
                    })?;
                if !visited.insert(edge) {
                    return Err(TopologyError::UnclosedLoop {
                        start: mesh.external(start),
                        steps,
                    }
                    .into());
                }
                cur = edge.other(cur).ok_or(TopologyError::UnclosedLoop {
                    start: mesh.external(start),
                    steps,
                })?;
                prev = edge;
            }
            debug!(start = start.0, len = path.len(), "boundary loop closed");
            paths.push(path);
        }

        for path in &paths {
            let id = mesh.profile.allocate_id();
            let lp = Loop::from_exterior_path(id, path, &mut mesh.edges);
            mesh.profile.push(lp);
        }
        info!(loops = paths.len(), boundary_edges = boundary.len(), "Profile::compute");
        Ok(paths.len())
    }
}

impl Mesh {
    /// Rebuild the profile from the current triangles' open edges.
    pub fn compute_profile(&mut self) -> Result<usize> {
        Profile::compute(self)
    }
}
