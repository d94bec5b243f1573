use super::coedge::Coedge;
use super::ids::{EdgeKey, VertexId};
use crate::geom2::Circle2D;

/// Three coedges forming a closed CCW cycle, plus the cached circumcircle.
#[derive(Debug)]
pub struct Triangle {
    coedges: [Coedge; 3],
    circle: Circle2D,
}

impl Triangle {
    pub(crate) fn new(coedges: [Coedge; 3], circle: Circle2D) -> Self {
        debug_assert!(
            (0..3).all(|i| coedges[i].vertex2() == coedges[(i + 1) % 3].vertex1()),
            "triangle coedges must form a closed cycle"
        );
        Self { coedges, circle }
    }

    #[inline]
    pub fn coedges(&self) -> &[Coedge; 3] {
        &self.coedges
    }

    #[inline]
    pub fn circle(&self) -> &Circle2D {
        &self.circle
    }

    /// Vertices in CCW order.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        [
            self.coedges[0].vertex1(),
            self.coedges[1].vertex1(),
            self.coedges[2].vertex1(),
        ]
    }

    #[inline]
    pub fn edges(&self) -> [EdgeKey; 3] {
        [
            self.coedges[0].edge(),
            self.coedges[1].edge(),
            self.coedges[2].edge(),
        ]
    }

    #[inline]
    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertices().contains(&v)
    }

    /// The vertex not on `edge`, if `edge` is one of this triangle's edges.
    pub fn opposite_vertex(&self, edge: EdgeKey) -> Option<VertexId> {
        if !self.edges().contains(&edge) {
            return None;
        }
        self.vertices().into_iter().find(|v| !edge.contains(*v))
    }

    pub(crate) fn into_coedges(self) -> [Coedge; 3] {
        self.coedges
    }
}
