//! Structural checks and summary statistics.

use super::{Mesh, SUPER_VERTEX_COUNT};

/// Counts describing the current state of a mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshReport {
    pub vertices: usize,
    pub edges: usize,
    pub triangles: usize,
    pub loops: usize,
    /// Edges with exactly one user.
    pub boundary_edges: usize,
    /// Edges with exactly two users.
    pub interior_edges: usize,
    /// Edges with zero or three-plus users.
    pub nonmanifold_edges: usize,
    pub total_area: f64,
}

impl Mesh {
    pub fn report(&self) -> MeshReport {
        let mut r = MeshReport {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            triangles: self.triangle_count(),
            loops: self.profile.len(),
            total_area: self.total_area(),
            ..MeshReport::default()
        };
        for e in self.edges.iter() {
            match e.use_count() {
                1 => r.boundary_edges += 1,
                2 => r.interior_edges += 1,
                _ => r.nonmanifold_edges += 1,
            }
        }
        r
    }

    /// Every triangle edge is used by one or two triangles; with a profile
    /// present, every edge used by one triangle is also a loop edge.
    pub fn is_watertight(&self) -> bool {
        let has_profile = !self.profile.is_empty();
        let untriangulated = self.triangles.is_empty();
        self.edges.iter().all(|e| {
            let tris = e.triangle_use_count();
            let loops = e.loop_use_count();
            match tris {
                0 => untriangulated && loops > 0,
                1 => !has_profile || loops == 1,
                2 => loops == 0,
                _ => false,
            }
        })
    }

    /// Number of (triangle, vertex) pairs where the vertex lies strictly
    /// inside the triangle's circumcircle. Zero for a Delaunay triangulation.
    pub fn delaunay_violations(&self, tol: f64) -> usize {
        let points: Vec<_> = self.vertices[SUPER_VERTEX_COUNT..]
            .iter()
            .enumerate()
            .map(|(i, v)| (i + SUPER_VERTEX_COUNT, v.position))
            .collect();
        self.triangles
            .values()
            .map(|t| {
                let own = t.vertices();
                points
                    .iter()
                    .filter(|(i, p)| {
                        !own.iter().any(|v| v.0 == *i) && t.circle().contains_strict(p, tol)
                    })
                    .count()
            })
            .sum()
    }
}
