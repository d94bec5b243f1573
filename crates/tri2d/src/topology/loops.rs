//! Closed boundary contours.

use super::coedge::Coedge;
use super::edge::EdgeTable;
use super::ids::{EdgeKey, LoopId, Owner, VertexId};
use super::Vertex;
use crate::error::{Result, TopologyError};
use crate::geom2::{polygon_signed_area, Line2D, Position2D};

/// Ordered, closed sequence of coedges describing one boundary contour.
///
/// Invariants:
/// - `coedges[i].vertex2() == coedges[i + 1].vertex1()` cyclically.
/// - Coedges run along the exterior side, i.e. opposite to the material
///   orientation. `vertex_indices()` reports the material order (CCW for an
///   outer boundary, CW for a hole).
#[derive(Debug)]
pub struct Loop {
    id: LoopId,
    coedges: Vec<Coedge>,
}

impl Loop {
    /// Build from vertices in material order (outer CCW, holes CW).
    pub(crate) fn from_material_order(
        id: LoopId,
        vertices: &[VertexId],
        edges: &mut EdgeTable,
    ) -> Self {
        let mut path = vertices.to_vec();
        path.reverse();
        Self::from_exterior_path(id, &path, edges)
    }

    /// Build from vertices already in exterior (coedge) order.
    pub(crate) fn from_exterior_path(id: LoopId, path: &[VertexId], edges: &mut EdgeTable) -> Self {
        let n = path.len();
        let coedges = (0..n)
            .map(|i| edges.attach(path[i], path[(i + 1) % n], Owner::Loop(id)))
            .collect();
        Self { id, coedges }
    }

    #[inline]
    pub fn id(&self) -> LoopId {
        self.id
    }

    #[inline]
    pub fn coedges(&self) -> &[Coedge] {
        &self.coedges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coedges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coedges.is_empty()
    }

    /// Vertex sequence in material order.
    pub fn vertex_indices(&self) -> Vec<VertexId> {
        self.coedges.iter().rev().map(Coedge::vertex1).collect()
    }

    /// Positions in material order.
    pub fn points(&self, vertices: &[Vertex]) -> Vec<Position2D> {
        self.vertex_indices()
            .into_iter()
            .map(|v| vertices[v.0].position)
            .collect()
    }

    /// Shoelace area of the material-order polygon: positive for an outer
    /// boundary, negative for a hole.
    pub fn signed_area(&self, vertices: &[Vertex]) -> f64 {
        polygon_signed_area(&self.points(vertices))
    }

    #[inline]
    pub fn is_outer(&self, vertices: &[Vertex]) -> bool {
        self.signed_area(vertices) > 0.0
    }

    /// Index of the coedge that uses `edge`, if any.
    pub fn position_of(&self, edge: EdgeKey) -> Option<usize> {
        self.coedges.iter().position(|c| c.edge() == edge)
    }

    /// Split coedge `index` at its midpoint.
    ///
    /// Appends the midpoint to `vertices`, splices two coedges in place of the
    /// old one, and removes the old edge from `edges`. Fails with
    /// `EdgeStillInUse` if anything besides this loop still references the old
    /// edge. Returns the new vertex.
    pub fn split_coedge(
        &mut self,
        index: usize,
        vertices: &mut Vec<Vertex>,
        edges: &mut EdgeTable,
    ) -> Result<VertexId> {
        if index >= self.coedges.len() {
            return Err(TopologyError::CoedgeOutOfRange {
                index,
                len: self.coedges.len(),
            }
            .into());
        }
        let (a, b) = {
            let c = &self.coedges[index];
            (c.vertex1(), c.vertex2())
        };
        let count = vertices.len();
        let out_of_range = |v: VertexId| TopologyError::VertexOutOfRange { index: v.0, count };
        let pa = vertices.get(a.0).ok_or_else(|| out_of_range(a))?.position;
        let pb = vertices.get(b.0).ok_or_else(|| out_of_range(b))?.position;
        let m = VertexId(vertices.len());
        vertices.push(Vertex::new(Line2D::new(pa, pb).midpoint()));

        // Direction of each half follows a → b, so its forward flag is the
        // key comparison of the half's own endpoints.
        let first = edges.attach(a, m, Owner::Loop(self.id));
        let second = edges.attach(m, b, Owner::Loop(self.id));
        let old = std::mem::replace(&mut self.coedges[index], first);
        self.coedges.insert(index + 1, second);

        let key = old.edge();
        edges.release(old)?;
        edges.remove(key)?;
        Ok(m)
    }

    /// Give every coedge back to the edge table (used when the loop is dropped).
    pub(crate) fn release_all(self, edges: &mut EdgeTable) -> Result<Vec<EdgeKey>> {
        let mut keys = Vec::with_capacity(self.coedges.len());
        for c in self.coedges {
            keys.push(c.edge());
            edges.release(c)?;
        }
        Ok(keys)
    }
}
