//! Error types for the triangulation kernel.
//!
//! All variants describe programmer or input-data errors. None of them is
//! transient, so nothing in the crate retries on failure.

use thiserror::Error;

use crate::topology::{LoopId, TriangleId};

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors surfaced by mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Fewer vertices/points than the operation needs.
    #[error("insufficient input: need at least {required}, got {actual}")]
    InsufficientInput {
        /// Minimum count required.
        required: usize,
        /// Count provided.
        actual: usize,
    },

    /// Enough vertices, but all collinear or coincident: no triangle exists.
    #[error("degenerate input: {vertices} vertices span no triangle")]
    DegenerateInput {
        /// Number of real vertices triangulated.
        vertices: usize,
    },

    /// The mesh is in a state its invariants forbid.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// An iterative loop exceeded its iteration bound.
    #[error("{operation} exceeded its iteration guard ({limit})")]
    RunawayGuardTripped {
        /// Name of the guarded operation.
        operation: &'static str,
        /// The bound that was hit.
        limit: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// I/O failure while reading or writing a dump.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed p2d text.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn runaway(operation: &'static str, limit: usize) -> Self {
        tracing::warn!(operation, limit, "iteration guard tripped");
        MeshError::RunawayGuardTripped { operation, limit }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        MeshError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Violations of the mesh's topological invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A boundary walk reached a vertex without exactly two boundary edges.
    #[error("vertex {vertex} has {degree} boundary edges (expected 2)")]
    JunctionVertex {
        /// External vertex index.
        vertex: usize,
        /// Number of incident boundary edges.
        degree: usize,
    },

    /// A boundary walk did not return to its start vertex.
    #[error("boundary loop starting at vertex {start} did not close after {steps} steps")]
    UnclosedLoop {
        /// External index of the start vertex.
        start: usize,
        /// Steps taken before giving up.
        steps: usize,
    },

    /// Removal was requested for an edge that still has users.
    #[error("edge ({v1}, {v2}) is still used by {uses} coedge(s)")]
    EdgeStillInUse {
        /// Lower vertex index.
        v1: usize,
        /// Higher vertex index.
        v2: usize,
        /// Remaining use count.
        uses: usize,
    },

    /// A coedge refers to an edge that is not in the mesh.
    #[error("edge ({v1}, {v2}) does not exist")]
    MissingEdge {
        /// Lower vertex index.
        v1: usize,
        /// Higher vertex index.
        v2: usize,
    },

    /// Vertex index out of range.
    #[error("vertex index {index} out of range (mesh has {count} vertices)")]
    VertexOutOfRange {
        /// The invalid index.
        index: usize,
        /// Number of vertices.
        count: usize,
    },

    /// Coedge index out of range within a loop.
    #[error("coedge index {index} out of range (loop has {len} coedges)")]
    CoedgeOutOfRange {
        /// The invalid index.
        index: usize,
        /// Loop length.
        len: usize,
    },

    /// No loop with this id exists in the profile.
    #[error("unknown loop {0:?}")]
    UnknownLoop(LoopId),

    /// No triangle with this id exists in the mesh.
    #[error("unknown triangle {0:?}")]
    UnknownTriangle(TriangleId),

    /// A loop needs at least three distinct points.
    #[error("degenerate loop with {points} point(s)")]
    DegenerateLoop {
        /// Number of points supplied.
        points: usize,
    },
}
