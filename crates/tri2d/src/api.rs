//! Curated surface for callers that drive the kernel end to end.
//!
//! Prefer these re-exports over reaching into submodules; internal layout may
//! move between versions.

// Geometry
pub use crate::geom2::{
    angle_between, cross, polygon_signed_area, pos, triangle_signed_area, try_normalize,
    BoundingBox2D, Circle2D, Line2D, LineIntersection, Position2D, Vector2D,
};
// Topology handles
pub use crate::topology::{Coedge, Edge, EdgeKey, Loop, LoopId, Owner, Triangle, TriangleId, VertexId};
// Mesh and algorithms
pub use crate::mesh::{LoopView, Mesh, MeshCfg, MeshReport, TriangleView, SUPER_VERTEX_COUNT};
// Profiles
pub use crate::profile::{read_p2d, write_p2d, LoopOptimizer, Profile};
// Sampling
pub use crate::sample::{random_points, star_polygon, ReplayToken as SampleReplay};
