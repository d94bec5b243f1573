use super::*;
use crate::error::{MeshError, TopologyError};
use crate::geom2::{pos, Position2D};
use crate::mesh::Mesh;

fn square(x0: f64, y0: f64, s: f64) -> Vec<Position2D> {
    vec![pos(x0, y0), pos(x0 + s, y0), pos(x0 + s, y0 + s), pos(x0, y0 + s)]
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn compute_recovers_outline_of_imported_triangles() {
    let mut mesh = Mesh::new();
    for p in square(0.0, 0.0, 1.0) {
        mesh.add_vertex(p);
    }
    mesh.add_triangle(0, 1, 2).unwrap();
    mesh.add_triangle(0, 3, 2).unwrap();
    assert_eq!(mesh.compute_profile().unwrap(), 1);

    let loops: Vec<_> = mesh.loops().collect();
    assert_eq!(loops.len(), 1);
    assert!(approx(loops[0].signed_area, 1.0));
    let mut vs = loops[0].vertices.clone();
    vs.sort_unstable();
    assert_eq!(vs, vec![0, 1, 2, 3]);
    // Loop edges now carry a triangle and a loop user each.
    assert!(mesh.edges().all(|e| e.use_count() == 2));
}

#[test]
fn compute_rejects_bow_tie_junction() {
    let mut mesh = Mesh::new();
    for p in [pos(0.0, 0.0), pos(1.0, 0.0), pos(1.0, 1.0), pos(-1.0, 0.0), pos(-1.0, -1.0)] {
        mesh.add_vertex(p);
    }
    mesh.add_triangle(0, 1, 2).unwrap();
    mesh.add_triangle(0, 3, 4).unwrap();
    let err = mesh.compute_profile().unwrap_err();
    assert!(matches!(
        err,
        MeshError::Topology(TopologyError::JunctionVertex { vertex: 0, degree: 4 })
    ));
}

#[test]
fn compute_on_holed_mesh_yields_outer_and_hole() {
    let mut mesh = Mesh::new();
    mesh.add_loop(&square(0.0, 0.0, 4.0)).unwrap();
    let mut hole = square(1.0, 1.0, 2.0);
    hole.reverse();
    mesh.add_loop(&hole).unwrap();
    mesh.triangulate_profile(true, true, true).unwrap();

    assert_eq!(mesh.compute_profile().unwrap(), 2);
    let mut areas: Vec<f64> = mesh.loops().map(|l| l.signed_area).collect();
    areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!(approx(areas[0], -4.0));
    assert!(approx(areas[1], 16.0));
}

#[test]
fn empty_mesh_has_no_boundary() {
    let mut mesh = Mesh::new();
    assert_eq!(mesh.compute_profile().unwrap(), 0);
    assert!(mesh.profile().is_empty());
}

#[test]
fn sort_by_area_puts_largest_first_and_is_stable() {
    let mut mesh = Mesh::new();
    let a = mesh.add_loop(&square(10.0, 0.0, 1.0)).unwrap();
    let b = mesh.add_loop(&square(0.0, 0.0, 5.0)).unwrap();
    let c = mesh.add_loop(&square(20.0, 0.0, 1.0)).unwrap();
    mesh.profile.sort_by_area(&mesh.vertices);
    let order: Vec<_> = mesh.profile().loops().iter().map(|l| l.id()).collect();
    assert_eq!(order, vec![b, a, c]);
    assert!(mesh.profile().get(c).is_some());
}

#[test]
fn optimizer_drops_collinear_points_only() {
    let pts = vec![
        pos(0.0, 0.0),
        pos(0.5, 0.0),
        pos(1.0, 0.0),
        pos(1.0, 0.5),
        pos(1.0, 1.0),
        pos(0.0, 1.0),
    ];
    let out = LoopOptimizer::new(1e-6, 1.5).optimize(&pts);
    assert_eq!(out, square(0.0, 0.0, 1.0));
}

#[test]
fn optimizer_keeps_points_when_gap_is_large() {
    let pts = vec![pos(0.0, 0.0), pos(0.5, 0.0), pos(1.0, 0.0), pos(1.0, 1.0), pos(0.0, 1.0)];
    // Outer distance 1.0 exceeds the distance tolerance: nothing may go.
    let out = LoopOptimizer::new(1e-6, 0.5).optimize(&pts);
    assert_eq!(out, pts);
}

#[test]
fn optimizer_never_goes_below_three_points() {
    let pts: Vec<_> = (0..10).map(|i| pos(i as f64 * 0.01, 0.0)).collect();
    let out = LoopOptimizer::new(1.0, 10.0).optimize(&pts);
    assert_eq!(out.len(), 3);
}

#[test]
fn optimizer_is_idempotent() {
    let pts: Vec<_> = (0..32)
        .map(|i| {
            let t = i as f64 / 32.0 * std::f64::consts::TAU;
            let r = 1.0 + 0.02 * (5.0 * t).sin();
            pos(r * t.cos(), r * t.sin())
        })
        .collect();
    let opt = LoopOptimizer::new(0.05, 0.5);
    let once = opt.optimize(&pts);
    assert!(once.len() < pts.len());
    assert_eq!(opt.optimize(&once), once);
}

#[test]
fn optimize_profile_uses_material_order() {
    let mut mesh = Mesh::new();
    let mut pts = square(0.0, 0.0, 2.0);
    pts.insert(1, pos(1.0, 0.0));
    mesh.add_loop(&pts).unwrap();
    let loops = LoopOptimizer::new(1e-6, 3.0).optimize_profile(&mesh);
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].len(), 4);
    assert!(approx(crate::geom2::polygon_signed_area(&loops[0]), 4.0));
}

#[test]
fn p2d_text_round_trips_exactly() {
    let loops = vec![square(0.0, 0.0, 4.0), vec![pos(1.0, 1.0), pos(1.0, 3.0), pos(3.0 + 1e-3, 3.0)]];
    let mut buf = Vec::new();
    write_p2d(&mut buf, &loops).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.starts_with("p2d 2 0 0 4 4\np2d_path 4 16\n"));
    let back = read_p2d(buf.as_slice(), false).unwrap();
    assert_eq!(back, loops);
}

#[test]
fn p2d_translation_moves_into_first_quadrant() {
    let text = "p2d 1 -2 -1 0 1\n\np2d_path 3 2\n-2 -1\n0 -1\n0 1\n";
    let loops = read_p2d(text.as_bytes(), true).unwrap();
    assert_eq!(loops[0], vec![pos(0.0, 0.0), pos(2.0, 0.0), pos(2.0, 2.0)]);
}

#[test]
fn p2d_reports_line_of_malformed_input() {
    let text = "p2d 1 0 0 1 1\np2d_path 3 0.5\n0 0\n1 zero\n";
    match read_p2d(text.as_bytes(), false) {
        Err(MeshError::Parse { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(matches!(read_p2d("".as_bytes(), false), Err(MeshError::Parse { line: 1, .. })));
    assert!(matches!(
        read_p2d("poly 1\n".as_bytes(), false),
        Err(MeshError::Parse { line: 1, .. })
    ));
}

#[test]
fn mesh_from_p2d_builds_profile() {
    let text = "p2d 1 0 0 1 1\np2d_path 4 1\n0 0\n1 0\n1 1\n0 1\n";
    let mut mesh = Mesh::from_p2d(text.as_bytes(), false).unwrap();
    assert_eq!(mesh.profile().len(), 1);
    mesh.triangulate_profile(true, true, true).unwrap();
    assert_eq!(mesh.triangle_count(), 2);
    let mut out = Vec::new();
    mesh.to_p2d(&mut out).unwrap();
    let back = read_p2d(out.as_slice(), false).unwrap();
    assert!(approx(crate::geom2::polygon_signed_area(&back[0]), 1.0));
}
