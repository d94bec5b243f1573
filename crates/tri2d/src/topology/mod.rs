//! Topology primitives: vertices, edges, coedges, triangles, and loops.
//!
//! Purpose
//! - Model shared edges explicitly so "is this edge still in use" is an index
//!   lookup. Every `Edge` lives in an `EdgeTable` keyed by its canonical vertex
//!   pair; `Coedge`s are directed uses of an edge by one owner (a `Triangle` or
//!   a `Loop`) and are registered/deregistered with the table on create/release.
//!
//! Invariants
//! - At most one `Edge` per unordered vertex pair.
//! - `Edge::use_count()` equals the number of live coedges referencing it.
//! - Coedges are only minted by `EdgeTable::attach` and only dropped through
//!   `EdgeTable::release`, so the count cannot drift.
//! - Loop coedges run along the exterior side of the boundary: a material
//!   triangle and its loop traverse a shared edge in opposite directions.
//!
//! Code cross-refs: `mesh::Mesh` (owner of all arenas), `profile::Profile`.

mod coedge;
mod edge;
mod ids;
mod loops;
mod triangle;

pub use coedge::Coedge;
pub use edge::{CoedgeUse, Edge, EdgeTable};
pub use ids::{EdgeKey, LoopId, Owner, TriangleId, VertexId};
pub use loops::Loop;
pub use triangle::Triangle;

use crate::geom2::Position2D;

/// Mesh vertex: a position owned by the mesh's append-only vertex array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Position2D,
}

impl Vertex {
    #[inline]
    pub fn new(position: Position2D) -> Self {
        Self { position }
    }
}

#[cfg(test)]
mod tests;
