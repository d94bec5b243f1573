//! Index newtypes and the coedge owner tag.

use std::fmt;

/// Internal vertex index (slots 0..3 are the super-triangle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// Stable triangle identifier (never reused within one mesh).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub usize);

/// Stable loop identifier (independent of the loop's position in the profile).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoopId(pub usize);

/// Canonical undirected edge key: `lo < hi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: VertexId,
    hi: VertexId,
}

impl EdgeKey {
    /// Normalize an unordered pair.
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    #[inline]
    pub fn lo(&self) -> VertexId {
        self.lo
    }

    #[inline]
    pub fn hi(&self) -> VertexId {
        self.hi
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.lo == v || self.hi == v
    }

    /// The endpoint that is not `v` (or `None` if `v` is not an endpoint).
    #[inline]
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.lo == v {
            Some(self.hi)
        } else if self.hi == v {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Whether traversing `from → to` matches the key's `lo → hi` direction.
    #[inline]
    pub fn is_forward(from: VertexId, to: VertexId) -> bool {
        from < to
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo.0, self.hi.0)
    }
}

/// Owner of a coedge: a tagged index into the triangle map or the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Owner {
    Triangle(TriangleId),
    Loop(LoopId),
}

impl Owner {
    #[inline]
    pub fn triangle(&self) -> Option<TriangleId> {
        match *self {
            Owner::Triangle(t) => Some(t),
            Owner::Loop(_) => None,
        }
    }

    #[inline]
    pub fn as_loop(&self) -> Option<LoopId> {
        match *self {
            Owner::Loop(l) => Some(l),
            Owner::Triangle(_) => None,
        }
    }
}
