//! Mesh configuration (tolerance and iteration guards).
//!
//! Policy
//! - One `Copy` struct configured once per mesh; defaults suit O(1)..O(1e3)
//!   coordinate scales. Fixed internal constants live next to it.

use crate::error::{MeshError, Result};

/// Number of reserved leading vertex slots (the super-triangle).
pub const SUPER_VERTEX_COUNT: usize = 3;

/// Per-mesh tolerances and runaway guards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCfg {
    /// Slack for circumcircle containment and zero-length/coincidence guards.
    pub coincidence_tolerance: f64,
    /// Super-triangle size as a multiple of the input's largest extent (>= 2).
    pub super_margin: f64,
    /// Bound on retriangulate/recover cycles in `triangulate_profile`.
    pub max_repair_cycles: usize,
    /// Recovery split budget per `triangulate_profile` call, as a multiple of
    /// the loop vertex count at entry.
    pub max_split_growth: usize,
    /// Bound on refinement insertions in `triangulate_refine_area`.
    pub max_refine_insertions: usize,
    /// Bound on flip/split steps in `split_long_edges`.
    pub max_split_iterations: usize,
    /// Boundary walk guard: steps allowed = factor × boundary edges + 16.
    pub loop_walk_factor: usize,
}

impl Default for MeshCfg {
    fn default() -> Self {
        Self {
            coincidence_tolerance: 1e-9,
            super_margin: 100.0,
            max_repair_cycles: 256,
            max_split_growth: 16,
            max_refine_insertions: 100_000,
            max_split_iterations: 10_000,
            loop_walk_factor: 4,
        }
    }
}

impl MeshCfg {
    /// Reject values the algorithms cannot work with.
    pub fn validate(&self) -> Result<()> {
        let tol = self.coincidence_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(MeshError::invalid_param(
                "coincidence_tolerance",
                tol,
                "must be finite and non-negative",
            ));
        }
        if !(self.super_margin.is_finite() && self.super_margin >= 2.0) {
            return Err(MeshError::invalid_param(
                "super_margin",
                self.super_margin,
                "must be at least 2",
            ));
        }
        if self.max_repair_cycles == 0 {
            return Err(MeshError::invalid_param(
                "max_repair_cycles",
                0,
                "must be positive",
            ));
        }
        if self.max_split_growth == 0 {
            return Err(MeshError::invalid_param(
                "max_split_growth",
                0,
                "must be positive",
            ));
        }
        Ok(())
    }
}
