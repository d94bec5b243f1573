//! Triangulate a square with a square hole and print counts per stage.
//!
//! Usage:
//!   cargo run -p tri2d --example square_with_hole -- 0.25
//!
//! The optional argument is the area limit for the refinement stage.

use tri2d::prelude::*;

fn main() {
    let area_limit: f64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.25);

    let mut mesh = Mesh::new();
    let outer = [pos(0.0, 0.0), pos(4.0, 0.0), pos(4.0, 4.0), pos(0.0, 4.0)];
    let hole = [pos(1.0, 1.0), pos(1.0, 3.0), pos(3.0, 3.0), pos(3.0, 1.0)];
    if let Err(e) = mesh.add_loop(&outer).and_then(|_| mesh.add_loop(&hole)) {
        eprintln!("bad outline: {e}");
        return;
    }

    if let Err(e) = mesh.triangulate_profile(true, true, true) {
        eprintln!("triangulation failed: {e}");
        return;
    }
    print_stage("profile", &mesh.report());

    match mesh.triangulate_refine_area(area_limit, 0.5, true, true, true) {
        Ok(n) => println!("refine inserted {n} vertices"),
        Err(e) => eprintln!("refinement failed: {e}"),
    }
    print_stage("refined", &mesh.report());
    println!("watertight: {}", mesh.is_watertight());
}

fn print_stage(name: &str, r: &MeshReport) {
    println!(
        "{name}: V={} E={} T={} loops={} area={:.6}",
        r.vertices, r.edges, r.triangles, r.loops, r.total_area
    );
}
