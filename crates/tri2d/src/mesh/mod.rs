//! Mesh container and the triangulation algorithms that operate on it.
//!
//! Purpose
//! - Own every vertex, edge, triangle, and the profile of one 2D domain, and
//!   expose the kernel operations: point-cloud and profile-constrained
//!   triangulation, Bowyer-Watson insertion, boundary recovery, refinement,
//!   long-edge splitting, and validation.
//!
//! Conventions
//! - Vertex slots `0..SUPER_VERTEX_COUNT` hold the super-triangle. Public
//!   indices (`get_vertex`, `TriangleView::vertices`, `LoopView::vertices`) are
//!   shifted by that offset so callers only ever see their own vertices.
//! - Triangles are kept in a `BTreeMap` by stable id; iteration order is
//!   creation order, which keeps every pass deterministic.
//! - Passes that delete while scanning first collect ids, then mutate.
//!
//! Code cross-refs: `topology::{EdgeTable, Triangle, Loop}`, `profile::Profile`.

mod cfg;
mod constrained;
mod insert;
mod refine;
mod triangulate;
mod validate;

pub use cfg::{MeshCfg, SUPER_VERTEX_COUNT};
pub use validate::MeshReport;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{MeshError, Result, TopologyError};
use crate::geom2::{triangle_signed_area, BoundingBox2D, Circle2D, Position2D};
use crate::profile::Profile;
use crate::topology::{Edge, EdgeKey, EdgeTable, Loop, LoopId, Owner, Triangle, TriangleId, Vertex, VertexId};

/// Triangle as seen by callers: public vertex indices (CCW) and circumcircle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleView {
    pub id: TriangleId,
    pub vertices: [usize; 3],
    pub circle: Circle2D,
}

/// Profile loop as seen by callers: public vertex indices in material order.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopView {
    pub id: LoopId,
    pub vertices: Vec<usize>,
    pub signed_area: f64,
}

/// A single 2D domain: vertices, shared edges, triangles, and boundary profile.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: EdgeTable,
    pub(crate) triangles: BTreeMap<TriangleId, Triangle>,
    next_triangle: usize,
    pub(crate) profile: Profile,
    cfg: MeshCfg,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    pub fn new() -> Self {
        Self::with_cfg(MeshCfg::default())
    }

    pub fn with_cfg(cfg: MeshCfg) -> Self {
        Self {
            vertices: Self::super_slots(),
            edges: EdgeTable::new(),
            triangles: BTreeMap::new(),
            next_triangle: 0,
            profile: Profile::default(),
            cfg,
        }
    }

    fn super_slots() -> Vec<Vertex> {
        vec![Vertex::new(Position2D::origin()); SUPER_VERTEX_COUNT]
    }

    #[inline]
    pub fn cfg(&self) -> &MeshCfg {
        &self.cfg
    }

    pub fn set_cfg(&mut self, cfg: MeshCfg) {
        self.cfg = cfg;
    }

    #[inline]
    pub fn coincidence_tolerance(&self) -> f64 {
        self.cfg.coincidence_tolerance
    }

    pub fn set_coincidence_tolerance(&mut self, tol: f64) {
        self.cfg.coincidence_tolerance = tol;
    }

    // ---- vertices -------------------------------------------------------

    /// Number of caller-visible vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() - SUPER_VERTEX_COUNT
    }

    pub fn get_vertex(&self, index: usize) -> Result<Position2D> {
        Ok(self.position(self.internal(index)?))
    }

    /// Caller-visible vertex positions in index order.
    pub fn vertex_positions(&self) -> impl Iterator<Item = Position2D> + '_ {
        self.vertices[SUPER_VERTEX_COUNT..].iter().map(|v| v.position)
    }

    /// Append a free vertex; it joins the triangulation on the next
    /// `triangulate_vertices` (or immediately via `insert_point`).
    pub fn add_vertex(&mut self, position: Position2D) -> usize {
        let v = self.push_vertex(position);
        self.external(v)
    }

    // ---- loops ----------------------------------------------------------

    /// Add a closed boundary polyline (outer boundaries CCW, holes CW).
    ///
    /// Consecutive coincident points (and a repeated closing point) are
    /// dropped; at least three distinct points must remain.
    pub fn add_loop(&mut self, points: &[Position2D]) -> Result<LoopId> {
        let tol = self.cfg.coincidence_tolerance;
        let mut pts: Vec<Position2D> = Vec::with_capacity(points.len());
        for p in points {
            if pts.last().map_or(true, |q| (p - q).norm() > tol) {
                pts.push(*p);
            }
        }
        while pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).norm() <= tol {
            pts.pop();
        }
        if pts.len() < 3 {
            return Err(TopologyError::DegenerateLoop { points: pts.len() }.into());
        }
        let ids: Vec<VertexId> = pts.into_iter().map(|p| self.push_vertex(p)).collect();
        let id = self.profile.allocate_id();
        let lp = Loop::from_material_order(id, &ids, &mut self.edges);
        debug!(loop_id = id.0, points = ids.len(), "add_loop");
        self.profile.push(lp);
        Ok(id)
    }

    #[inline]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Profile loops with public vertex indices and signed areas.
    pub fn loops(&self) -> impl Iterator<Item = LoopView> + '_ {
        self.profile.loops().iter().map(|lp| LoopView {
            id: lp.id(),
            vertices: lp
                .vertex_indices()
                .into_iter()
                .map(|v| self.external(v))
                .collect(),
            signed_area: lp.signed_area(&self.vertices),
        })
    }

    /// Loop positions in material order, one `Vec` per loop.
    pub fn loop_points(&self) -> Vec<Vec<Position2D>> {
        self.profile
            .loops()
            .iter()
            .map(|lp| lp.points(&self.vertices))
            .collect()
    }

    // ---- triangles ------------------------------------------------------

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(&id)
    }

    pub fn triangles(&self) -> impl Iterator<Item = TriangleView> + '_ {
        self.triangles.iter().map(|(&id, t)| {
            let [a, b, c] = t.vertices();
            TriangleView {
                id,
                vertices: [self.external(a), self.external(b), self.external(c)],
                circle: *t.circle(),
            }
        })
    }

    /// Import a triangle by public vertex indices (reordered to CCW).
    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> Result<TriangleId> {
        if a == b || b == c || a == c {
            return Err(MeshError::invalid_param(
                "triangle",
                format!("({a}, {b}, {c})"),
                "vertices must be distinct",
            ));
        }
        let (a, b, c) = (self.internal(a)?, self.internal(b)?, self.internal(c)?);
        Ok(self.create_triangle(a, b, c))
    }

    /// Corner positions of a triangle (CCW).
    pub fn triangle_positions(&self, id: TriangleId) -> Option<[Position2D; 3]> {
        let t = self.triangles.get(&id)?;
        Some(t.vertices().map(|v| self.position(v)))
    }

    pub fn triangle_area(&self, id: TriangleId) -> Option<f64> {
        let [a, b, c] = self.triangle_positions(id)?;
        Some(triangle_signed_area(&a, &b, &c))
    }

    /// Sum of (signed, hence positive) triangle areas.
    pub fn total_area(&self) -> f64 {
        self.triangles
            .keys()
            .filter_map(|&id| self.triangle_area(id))
            .sum()
    }

    // ---- edges ----------------------------------------------------------

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Edge between two public vertex indices, if present.
    pub fn find_edge(&self, a: usize, b: usize) -> Option<&Edge> {
        let a = self.internal(a).ok()?;
        let b = self.internal(b).ok()?;
        self.edges.find(a, b)
    }

    /// Length of an edge.
    pub fn edge_length(&self, key: EdgeKey) -> f64 {
        (self.position(key.hi()) - self.position(key.lo())).norm()
    }

    /// Bounding box of the caller-visible vertices.
    pub fn bounding_box(&self) -> BoundingBox2D {
        BoundingBox2D::from_points(self.vertices[SUPER_VERTEX_COUNT..].iter().map(|v| &v.position))
    }

    // ---- clearing -------------------------------------------------------

    /// Drop everything, keeping the configuration.
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.edges.clear();
        self.profile = Profile::default();
        self.vertices = Self::super_slots();
        self.next_triangle = 0;
    }

    /// Remove every triangle; edges still used by loops survive.
    ///
    /// Fails with `MissingEdge` if a triangle coedge was never registered on
    /// its edge.
    pub fn clear_triangles(&mut self) -> Result<()> {
        let triangles = std::mem::take(&mut self.triangles);
        for t in triangles.into_values() {
            for c in t.into_coedges() {
                self.edges.release(c)?;
            }
        }
        self.edges.remove_unused();
        Ok(())
    }

    /// Sweep edges with no users. Returns how many were deleted.
    pub fn clear_unused_edges(&mut self) -> usize {
        self.edges.remove_unused()
    }

    /// Drop all profile loops (their vertices remain).
    pub fn clear_profile(&mut self) -> Result<()> {
        let loops = self.profile.take_loops();
        let mut touched = BTreeSet::new();
        for lp in loops {
            touched.extend(lp.release_all(&mut self.edges)?);
        }
        for key in touched {
            self.edges.remove_if_unused(key);
        }
        Ok(())
    }

    /// Drop every vertex. Only legal once nothing references them.
    pub fn clear_vertices(&mut self) -> Result<()> {
        if let Some(e) = self.edges.iter().next() {
            return Err(TopologyError::EdgeStillInUse {
                v1: e.v1().0,
                v2: e.v2().0,
                uses: e.use_count(),
            }
            .into());
        }
        self.vertices = Self::super_slots();
        Ok(())
    }

    // ---- crate-internal primitives --------------------------------------

    #[inline]
    pub(crate) fn position(&self, v: VertexId) -> Position2D {
        self.vertices[v.0].position
    }

    #[inline]
    pub(crate) fn external(&self, v: VertexId) -> usize {
        v.0.saturating_sub(SUPER_VERTEX_COUNT)
    }

    pub(crate) fn internal(&self, index: usize) -> Result<VertexId> {
        if index >= self.vertex_count() {
            return Err(TopologyError::VertexOutOfRange {
                index,
                count: self.vertex_count(),
            }
            .into());
        }
        Ok(VertexId(index + SUPER_VERTEX_COUNT))
    }

    #[inline]
    pub(crate) fn is_super(v: VertexId) -> bool {
        v.0 < SUPER_VERTEX_COUNT
    }

    pub(crate) fn push_vertex(&mut self, position: Position2D) -> VertexId {
        self.vertices.push(Vertex::new(position));
        VertexId(self.vertices.len() - 1)
    }

    /// Create a triangle, ordering the corners CCW by signed area.
    pub(crate) fn create_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) -> TriangleId {
        let (pa, pb, pc) = (self.position(a), self.position(b), self.position(c));
        let (b, c, pb, pc) = if triangle_signed_area(&pa, &pb, &pc) < 0.0 {
            (c, b, pc, pb)
        } else {
            (b, c, pb, pc)
        };
        let id = TriangleId(self.next_triangle);
        self.next_triangle += 1;
        let owner = Owner::Triangle(id);
        let coedges = [
            self.edges.attach(a, b, owner),
            self.edges.attach(b, c, owner),
            self.edges.attach(c, a, owner),
        ];
        let circle = Circle2D::circumcircle_or_unbounded(&pa, &pb, &pc);
        self.triangles.insert(id, Triangle::new(coedges, circle));
        id
    }

    /// Remove a triangle and release its coedges; orphaned edges are left for
    /// the caller to sweep. Returns the triangle's edge keys.
    pub(crate) fn delete_triangle(&mut self, id: TriangleId) -> Result<[EdgeKey; 3]> {
        let t = self
            .triangles
            .remove(&id)
            .ok_or(TopologyError::UnknownTriangle(id))?;
        let keys = t.edges();
        for c in t.into_coedges() {
            self.edges.release(c)?;
        }
        Ok(keys)
    }

    /// Delete a batch of triangles and sweep the edges they orphaned.
    pub(crate) fn delete_triangles(&mut self, ids: impl IntoIterator<Item = TriangleId>) -> Result<usize> {
        let mut touched = BTreeSet::new();
        let mut n = 0;
        for id in ids {
            touched.extend(self.delete_triangle(id)?);
            n += 1;
        }
        for key in touched {
            self.edges.remove_if_unused(key);
        }
        Ok(n)
    }

    /// Triangles sharing `key`, with the direction each uses it in.
    pub(crate) fn triangles_on_edge(&self, key: EdgeKey) -> Vec<(TriangleId, bool)> {
        self.edges
            .get(key)
            .map(|e| e.triangle_users().collect())
            .unwrap_or_default()
    }
}
