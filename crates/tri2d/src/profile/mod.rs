//! Profile: the set of boundary loops that defines a 2D domain.
//!
//! Purpose
//! - Hold the loops added with `Mesh::add_loop` or rebuilt from a mesh's open
//!   edges (`Profile::compute`), simplify them (`LoopOptimizer`), and move them
//!   in and out of the plain-text p2d dump.
//!
//! Conventions
//! - Loop ids are never reused within one profile.
//! - `sort_by_area` is stable, so equal areas keep insertion order.
//!
//! Code cross-refs: `topology::Loop`, `mesh::Mesh::triangulate_profile`.

mod compute;
mod optimize;
mod p2d;

pub use optimize::LoopOptimizer;
pub use p2d::{read_p2d, write_p2d};

use std::cmp::Ordering;

use crate::topology::{Loop, LoopId, Vertex};

/// Ordered collection of closed boundary loops.
#[derive(Debug, Default)]
pub struct Profile {
    loops: Vec<Loop>,
    next_id: usize,
}

impl Profile {
    #[inline]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn get(&self, id: LoopId) -> Option<&Loop> {
        self.loops.iter().find(|lp| lp.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: LoopId) -> Option<&mut Loop> {
        self.loops.iter_mut().find(|lp| lp.id() == id)
    }

    pub(crate) fn allocate_id(&mut self) -> LoopId {
        let id = LoopId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn push(&mut self, lp: Loop) {
        self.loops.push(lp);
    }

    /// Move the loops out, leaving the profile empty (ids keep counting up).
    pub(crate) fn take_loops(&mut self) -> Vec<Loop> {
        std::mem::take(&mut self.loops)
    }

    /// Largest absolute area first.
    pub(crate) fn sort_by_area(&mut self, vertices: &[Vertex]) {
        let mut keyed: Vec<(f64, Loop)> = self
            .take_loops()
            .into_iter()
            .map(|lp| (lp.signed_area(vertices).abs(), lp))
            .collect();
        keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        self.loops = keyed.into_iter().map(|(_, lp)| lp).collect();
    }
}

#[cfg(test)]
mod tests;
