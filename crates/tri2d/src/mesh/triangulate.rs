//! Unconstrained Delaunay triangulation of the mesh's vertex set.

use tracing::{debug, info};

use super::{Mesh, SUPER_VERTEX_COUNT};
use crate::error::{MeshError, Result};
use crate::geom2::{BoundingBox2D, Position2D};
use crate::topology::{TriangleId, VertexId};

impl Mesh {
    /// Replace the mesh with the Delaunay triangulation of `points`.
    pub fn triangulate_point_cloud(&mut self, points: &[Position2D]) -> Result<()> {
        self.clear();
        self.vertices.reserve(points.len());
        for p in points {
            self.push_vertex(*p);
        }
        self.triangulate_vertices()
    }

    /// Triangulate every vertex currently in the mesh (profile loops included).
    ///
    /// Existing triangles are discarded first. On success the triangles cover
    /// the convex hull of the vertices with no holes; loops are not enforced.
    /// Vertices that are all collinear (or coincident) leave no triangle and
    /// fail with `DegenerateInput`.
    pub fn triangulate_vertices(&mut self) -> Result<()> {
        self.cfg().validate()?;
        let real = self.vertex_count();
        if real < 3 {
            return Err(MeshError::InsufficientInput {
                required: 3,
                actual: real,
            });
        }
        self.clear_triangles()?;
        self.clear_unused_edges();

        self.place_super_triangle();
        self.create_triangle(VertexId(0), VertexId(1), VertexId(2));
        let mut skipped = 0usize;
        for i in SUPER_VERTEX_COUNT..self.vertices.len() {
            if !self.bowyer_watson(VertexId(i))? {
                skipped += 1;
            }
        }
        let stripped = self.remove_super_triangles()?;
        if self.triangles.is_empty() {
            return Err(MeshError::DegenerateInput { vertices: real });
        }
        info!(
            vertices = real,
            skipped,
            stripped,
            triangles = self.triangle_count(),
            "triangulate_vertices"
        );
        Ok(())
    }

    /// Assign the reserved slots a triangle enclosing every real vertex.
    fn place_super_triangle(&mut self) {
        let bbox = BoundingBox2D::from_points(
            self.vertices[SUPER_VERTEX_COUNT..].iter().map(|v| &v.position),
        );
        let c = bbox.center();
        let extent = if bbox.extent() > 0.0 { bbox.extent() } else { 1.0 };
        let m = self.cfg().super_margin * extent;
        self.vertices[0].position = Position2D::new(c.x - 2.0 * m, c.y - m);
        self.vertices[1].position = Position2D::new(c.x + 2.0 * m, c.y - m);
        self.vertices[2].position = Position2D::new(c.x, c.y + 2.0 * m);
        debug!(cx = c.x, cy = c.y, margin = m, "super triangle placed");
    }

    /// Delete every triangle touching a super vertex and the edges they leave behind.
    fn remove_super_triangles(&mut self) -> Result<usize> {
        let doomed: Vec<TriangleId> = self
            .triangles
            .iter()
            .filter(|(_, t)| t.vertices().iter().any(|&v| Self::is_super(v)))
            .map(|(&id, _)| id)
            .collect();
        let n = self.delete_triangles(doomed)?;
        self.clear_unused_edges();
        Ok(n)
    }
}
