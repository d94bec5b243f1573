//! Property-based checks of the triangulation invariants.
//!
//! Run with: cargo test -p tri2d --test properties

use proptest::prelude::*;
use tri2d::geom2::polygon_signed_area;
use tri2d::profile::LoopOptimizer;
use tri2d::sample::{random_points, star_polygon, ReplayToken};
use tri2d::Mesh;

fn arb_token() -> impl Strategy<Value = ReplayToken> {
    (any::<u64>(), 0u64..1_000).prop_map(|(seed, index)| ReplayToken { seed, index })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn point_cloud_triangulation_is_delaunay(n in 3usize..80, tok in arb_token()) {
        let pts = random_points(n, 10.0, tok);
        let mut mesh = Mesh::new();
        mesh.triangulate_point_cloud(&pts).unwrap();
        prop_assert!(mesh.triangle_count() > 0);
        prop_assert_eq!(mesh.delaunay_violations(1e-9), 0);
        prop_assert_eq!(mesh.report().nonmanifold_edges, 0);
    }

    #[test]
    fn star_profile_is_watertight_and_conserves_area(n in 5usize..40, tok in arb_token()) {
        let outline = star_polygon(n, 0.5, 1.5, tok);
        let expected = polygon_signed_area(&outline);
        let mut mesh = Mesh::new();
        mesh.add_loop(&outline).unwrap();
        mesh.triangulate_profile(true, true, true).unwrap();
        prop_assert!(mesh.is_watertight());
        prop_assert!((mesh.total_area() - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn boundary_reconstruction_returns_the_outline(n in 5usize..30, tok in arb_token()) {
        let outline = star_polygon(n, 0.5, 1.5, tok);
        let mut mesh = Mesh::new();
        mesh.add_loop(&outline).unwrap();
        mesh.triangulate_profile(true, true, true).unwrap();
        prop_assert_eq!(mesh.compute_profile().unwrap(), 1);
        let lp = mesh.loops().next().unwrap();
        // Recovery may have added midpoints; every input vertex must be on the loop.
        prop_assert!((0..n).all(|i| lp.vertices.contains(&i)));
        let expected = polygon_signed_area(&outline);
        prop_assert!((lp.signed_area - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn loop_optimizer_is_idempotent(
        n in 3usize..60,
        tok in arb_token(),
        arrow in 0.0f64..0.5,
        distance in 0.0f64..2.0,
    ) {
        let outline = star_polygon(n, 0.8, 1.2, tok);
        let opt = LoopOptimizer::new(arrow, distance);
        let once = opt.optimize(&outline);
        prop_assert!(once.len() >= 3.min(outline.len()));
        prop_assert!(once.len() <= outline.len());
        prop_assert_eq!(opt.optimize(&once), once);
    }
}
