//! JSON interchange for triangulated meshes.

use serde::{Deserialize, Serialize};
use tri2d::{Mesh, MeshCfg, Position2D};

/// One profile loop: public vertex indices in material order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopDoc {
    pub vertices: Vec<usize>,
    pub signed_area: f64,
}

/// Vertices, CCW triangles, and (optionally) the profile loops of a mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshDoc {
    pub vertices: Vec<[f64; 2]>,
    pub triangles: Vec<[usize; 3]>,
    #[serde(default)]
    pub loops: Vec<LoopDoc>,
    #[serde(default)]
    pub total_area: f64,
}

impl MeshDoc {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertex_positions().map(|p| [p.x, p.y]).collect(),
            triangles: mesh.triangles().map(|t| t.vertices).collect(),
            loops: mesh
                .loops()
                .map(|l| LoopDoc {
                    vertices: l.vertices,
                    signed_area: l.signed_area,
                })
                .collect(),
            total_area: mesh.total_area(),
        }
    }

    /// Rebuild vertices and triangles. Loops are not restored; they are
    /// recomputed from open edges when needed.
    pub fn to_mesh(&self, cfg: MeshCfg) -> tri2d::Result<Mesh> {
        let mut mesh = Mesh::with_cfg(cfg);
        for &[x, y] in &self.vertices {
            mesh.add_vertex(Position2D::new(x, y));
        }
        for &[a, b, c] in &self.triangles {
            mesh.add_triangle(a, b, c)?;
        }
        Ok(mesh)
    }
}
