//! Constrained 2D Delaunay triangulation with explicit edge/coedge topology.
//!
//! Layers (leaves first)
//! - `geom2`: positions, vectors, lines, circles, bounding boxes.
//! - `topology`: shared edges with registered coedge uses, triangles, loops.
//! - `mesh`: the `Mesh` container and every algorithm that mutates it.
//! - `profile`: loop sets, boundary reconstruction, simplification, p2d dumps.
//!
//! Conventions
//! - Outer boundaries are supplied CCW, holes CW. Triangles are always CCW.
//! - Operations return `error::Result`; nothing retries internally. After an
//!   error the mesh is locally consistent but should be discarded.
//! - The library logs through `tracing` and never installs a subscriber.

pub mod api;
pub mod error;
pub mod geom2;
pub mod mesh;
pub mod profile;
pub mod sample;
pub mod topology;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{MeshError, Result, TopologyError};
pub use geom2::{Position2D, Vector2D};
pub use mesh::{Mesh, MeshCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{MeshError, Result, TopologyError};
    pub use crate::geom2::{pos, BoundingBox2D, Circle2D, Line2D, Position2D, Vector2D};
    pub use crate::mesh::{LoopView, Mesh, MeshCfg, MeshReport, TriangleView};
    pub use crate::profile::{read_p2d, write_p2d, LoopOptimizer, Profile};
    pub use crate::sample::{random_points, star_polygon, ReplayToken};
}
