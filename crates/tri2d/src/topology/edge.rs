//! Shared edges and the arena that owns them.

use std::collections::BTreeMap;

use super::coedge::Coedge;
use super::ids::{EdgeKey, Owner, TriangleId, VertexId};
use crate::error::{Result, TopologyError};

/// One registered use of an edge (the arena-side mirror of a `Coedge`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoedgeUse {
    pub owner: Owner,
    pub forward: bool,
}

/// Undirected edge between two vertices plus the set of coedges using it.
///
/// Use-count semantics: `0` must not persist in the mesh, `1` is an open
/// (boundary) edge, `2` is shared, anything else is non-manifold.
#[derive(Clone, Debug)]
pub struct Edge {
    key: EdgeKey,
    users: Vec<CoedgeUse>,
}

impl Edge {
    #[inline]
    pub fn key(&self) -> EdgeKey {
        self.key
    }

    #[inline]
    pub fn v1(&self) -> VertexId {
        self.key.lo()
    }

    #[inline]
    pub fn v2(&self) -> VertexId {
        self.key.hi()
    }

    #[inline]
    pub fn users(&self) -> &[CoedgeUse] {
        &self.users
    }

    #[inline]
    pub fn use_count(&self) -> usize {
        self.users.len()
    }

    /// Triangles using this edge, with their traversal direction.
    pub fn triangle_users(&self) -> impl Iterator<Item = (TriangleId, bool)> + '_ {
        self.users
            .iter()
            .filter_map(|u| u.owner.triangle().map(|t| (t, u.forward)))
    }

    #[inline]
    pub fn triangle_use_count(&self) -> usize {
        self.triangle_users().count()
    }

    #[inline]
    pub fn loop_use_count(&self) -> usize {
        self.users.len() - self.triangle_use_count()
    }

    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.users.len() == 1
    }

    #[inline]
    pub fn is_interior(&self) -> bool {
        self.users.len() == 2
    }
}

/// Arena of edges keyed by canonical vertex pair.
///
/// `BTreeMap` keeps iteration order deterministic, which the repair loops rely
/// on for reproducible results.
#[derive(Clone, Debug, Default)]
pub struct EdgeTable {
    edges: BTreeMap<EdgeKey, Edge>,
}

impl EdgeTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn get(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key)
    }

    #[inline]
    pub fn find(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    #[inline]
    pub fn use_count(&self, key: EdgeKey) -> usize {
        self.edges.get(&key).map_or(0, Edge::use_count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Register a directed use `from → to` by `owner`, creating the edge if needed.
    pub(crate) fn attach(&mut self, from: VertexId, to: VertexId, owner: Owner) -> Coedge {
        debug_assert_ne!(from, to, "coedge endpoints must differ");
        let key = EdgeKey::new(from, to);
        let forward = EdgeKey::is_forward(from, to);
        self.edges
            .entry(key)
            .or_insert_with(|| Edge {
                key,
                users: Vec::with_capacity(2),
            })
            .users
            .push(CoedgeUse { owner, forward });
        Coedge::new(key, forward, owner)
    }

    /// Deregister a coedge. Returns the edge's remaining use count.
    ///
    /// The edge itself is left in place even at zero uses; callers decide when
    /// orphaned edges are swept (`remove_if_unused`, `remove_unused`).
    pub(crate) fn release(&mut self, coedge: Coedge) -> Result<usize> {
        let key = coedge.edge();
        let missing = TopologyError::MissingEdge {
            v1: key.lo().0,
            v2: key.hi().0,
        };
        let edge = self.edges.get_mut(&key).ok_or_else(|| missing.clone())?;
        let pos = edge
            .users
            .iter()
            .position(|u| u.owner == coedge.owner() && u.forward == coedge.forward())
            .ok_or(missing)?;
        edge.users.swap_remove(pos);
        Ok(edge.users.len())
    }

    /// Delete the edge if nothing uses it. Returns whether it was deleted.
    pub(crate) fn remove_if_unused(&mut self, key: EdgeKey) -> bool {
        if self.edges.get(&key).is_some_and(|e| e.users.is_empty()) {
            self.edges.remove(&key);
            true
        } else {
            false
        }
    }

    /// Delete an edge the caller believes is orphaned; error if it still has users.
    pub(crate) fn remove(&mut self, key: EdgeKey) -> Result<()> {
        match self.edges.get(&key) {
            None => Ok(()),
            Some(e) if e.users.is_empty() => {
                self.edges.remove(&key);
                Ok(())
            }
            Some(e) => Err(TopologyError::EdgeStillInUse {
                v1: key.lo().0,
                v2: key.hi().0,
                uses: e.users.len(),
            }
            .into()),
        }
    }

    /// Sweep every zero-use edge. Returns how many were deleted.
    pub(crate) fn remove_unused(&mut self) -> usize {
        let before = self.edges.len();
        self.edges.retain(|_, e| !e.users.is_empty());
        before - self.edges.len()
    }

    pub(crate) fn clear(&mut self) {
        self.edges.clear();
    }
}
