//! 2D geometric primitives (leaf layer).
//!
//! Purpose
//! - Provide the small value types every topology and mesh routine is written
//!   against: positions, vectors, parametric lines, circumcircles, and boxes.
//! - Keep predicates explicit about their tolerance argument; no hidden epsilons.
//!
//! Conventions
//! - `Position2D` is an affine point (`nalgebra::Point2<f64>`), `Vector2D` a
//!   displacement (`nalgebra::Vector2<f64>`). Positions minus positions give vectors.
//! - Signed areas are positive for counterclockwise order.
//!
//! Code cross-refs: `topology::Triangle` (cached `Circle2D`), `mesh::Mesh`.

mod bbox;
mod circle;
mod line;
mod types;

pub use bbox::BoundingBox2D;
pub use circle::Circle2D;
pub use line::{Line2D, LineIntersection};
pub use types::{
    angle_between, cross, polygon_signed_area, pos, triangle_signed_area, try_normalize,
    Position2D, Vector2D,
};

#[cfg(test)]
mod tests;
