//! Reproducible random inputs: point clouds and star-shaped outlines.
//!
//! Model
//! - Point clouds are uniform in the axis-aligned square `[-extent, extent]²`.
//! - Star polygons start from `n` equally spaced angles on [0, 2π), add bounded
//!   angular jitter and a radius drawn from `[r_min, r_max]`. Sorted angles and
//!   positive radii make the outline simple and CCW around the origin.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `Mesh::triangulate_point_cloud`, `Mesh::add_loop`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom2::Position2D;

/// Angular jitter as a fraction of the base spacing 2π/n.
const ANGLE_JITTER_FRAC: f64 = 0.3;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// `n` points drawn uniformly from `[-extent, extent]²`.
pub fn random_points(n: usize, extent: f64, tok: ReplayToken) -> Vec<Position2D> {
    let mut rng = tok.to_std_rng();
    let e = extent.abs().max(f64::MIN_POSITIVE);
    (0..n)
        .map(|_| Position2D::new(rng.gen_range(-e..=e), rng.gen_range(-e..=e)))
        .collect()
}

/// Star-shaped simple polygon with `max(n, 3)` vertices in CCW order.
pub fn star_polygon(n: usize, r_min: f64, r_max: f64, tok: ReplayToken) -> Vec<Position2D> {
    let mut rng = tok.to_std_rng();
    let n = n.max(3);
    let lo = r_min.abs().max(1e-9);
    let hi = r_max.abs().max(lo);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * delta;
    (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * ANGLE_JITTER_FRAC * delta;
            let th = phase + (k as f64) * delta + jitter;
            let r = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
            Position2D::new(th.cos() * r, th.sin() * r)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::polygon_signed_area;

    #[test]
    fn reproducible_draw() {
        let tok = ReplayToken { seed: 42, index: 7 };
        assert_eq!(random_points(16, 2.0, tok), random_points(16, 2.0, tok));
        assert_ne!(
            random_points(16, 2.0, tok),
            random_points(16, 2.0, ReplayToken::new(42, 8))
        );
        assert_eq!(star_polygon(9, 0.5, 1.0, tok), star_polygon(9, 0.5, 1.0, tok));
    }

    #[test]
    fn points_stay_in_extent() {
        let pts = random_points(500, 3.0, ReplayToken::new(1, 0));
        assert_eq!(pts.len(), 500);
        assert!(pts.iter().all(|p| p.x.abs() <= 3.0 && p.y.abs() <= 3.0));
    }

    #[test]
    fn star_is_ccw_with_bounded_radii() {
        let pts = star_polygon(24, 0.5, 1.5, ReplayToken::new(3, 11));
        assert_eq!(pts.len(), 24);
        assert!(polygon_signed_area(&pts) > 0.0);
        for p in &pts {
            let r = p.coords.norm();
            assert!((0.5 - 1e-12..=1.5 + 1e-12).contains(&r));
        }
        assert_eq!(star_polygon(1, 1.0, 1.0, ReplayToken::new(0, 0)).len(), 3);
    }
}
