use super::ids::{EdgeKey, Owner, VertexId};

/// Directed use of one edge by one owner.
///
/// Not `Clone`: each value corresponds to exactly one registration in the
/// `EdgeTable`, and giving it back through `EdgeTable::release` is the only way
/// to drop that registration.
#[derive(Debug, PartialEq, Eq)]
pub struct Coedge {
    edge: EdgeKey,
    forward: bool,
    owner: Owner,
}

impl Coedge {
    #[inline]
    pub(crate) fn new(edge: EdgeKey, forward: bool, owner: Owner) -> Self {
        Self {
            edge,
            forward,
            owner,
        }
    }

    #[inline]
    pub fn edge(&self) -> EdgeKey {
        self.edge
    }

    /// True when the coedge runs `lo → hi` of its edge key.
    #[inline]
    pub fn forward(&self) -> bool {
        self.forward
    }

    #[inline]
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Start vertex.
    #[inline]
    pub fn vertex1(&self) -> VertexId {
        if self.forward {
            self.edge.lo()
        } else {
            self.edge.hi()
        }
    }

    /// End vertex.
    #[inline]
    pub fn vertex2(&self) -> VertexId {
        if self.forward {
            self.edge.hi()
        } else {
            self.edge.lo()
        }
    }
}
