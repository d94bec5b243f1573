//! Command implementations. Each file-producing command writes its artifact
//! and a `<stem>.provenance.json` sidecar next to it.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tri2d::prelude::{
    pos, read_p2d, star_polygon, write_p2d, LoopOptimizer, Mesh, MeshCfg, MeshReport, Position2D,
    ReplayToken,
};

use crate::mesh_json::MeshDoc;
use crate::provenance::{current_git_rev, write_sidecar, Payload};

/// Settings shared by every command of one run.
pub struct Ctx {
    pub cfg: MeshCfg,
    pub tag: Option<String>,
}

impl Ctx {
    pub fn new(tolerance: Option<f64>, tag: Option<String>) -> Self {
        let mut cfg = MeshCfg::default();
        if let Some(tol) = tolerance {
            cfg.coincidence_tolerance = tol;
        }
        Self { cfg, tag }
    }

    fn mesh(&self) -> Mesh {
        Mesh::with_cfg(self.cfg)
    }

    fn payload(&self, command: &'static str, input: Option<&str>, params: serde_json::Value) -> Payload {
        let mut p = Payload::new(command, params).with_tag(self.tag.clone());
        if let Some(input) = input {
            p = p.with_input(input);
        }
        p
    }
}

/// Repair and post-processing switches for `profile`.
#[derive(Args, Clone, Debug, Serialize)]
pub struct ProfileOpts {
    /// Keep triangles on the outside of profile loops
    #[arg(long)]
    pub keep_nonmaterial: bool,
    /// Do not split lost boundary segments
    #[arg(long)]
    pub no_split: bool,
    /// Keep triangles with dangling edges
    #[arg(long)]
    pub keep_unbounded: bool,
    /// Refine until no triangle exceeds this area
    #[arg(long)]
    pub area_limit: Option<f64>,
    /// Refinement point: 0 = centroid, 1 = circumcenter
    #[arg(long, default_value_t = 0.5)]
    pub bias: f64,
    /// Split/flip edges longer than this
    #[arg(long)]
    pub max_edge: Option<f64>,
    /// Shift input so all coordinates are non-negative
    #[arg(long)]
    pub translate: bool,
}

impl Default for ProfileOpts {
    fn default() -> Self {
        Self {
            keep_nonmaterial: false,
            no_split: false,
            keep_unbounded: false,
            area_limit: None,
            bias: 0.5,
            max_edge: None,
            translate: false,
        }
    }
}

pub fn cloud(ctx: &Ctx, input: &str, out: &str, area_limit: Option<f64>, bias: f64) -> Result<()> {
    tracing::info!(input, out, tag = ?ctx.tag, "cloud");
    let points = read_points(input)?;
    let mut mesh = ctx.mesh();
    mesh.triangulate_point_cloud(&points)
        .with_context(|| format!("triangulating {} points from {input}", points.len()))?;
    let inserted = match area_limit {
        Some(limit) => mesh.triangulate_refine_area(limit, bias, false, false, false)?,
        None => 0,
    };
    write_mesh(&mesh, out)?;
    let params = json!({
        "points": points.len(),
        "area_limit": area_limit,
        "bias": bias,
        "refine_inserted": inserted,
        "tolerance": ctx.cfg.coincidence_tolerance,
        "report": report_json(&mesh.report()),
    });
    write_sidecar(out, ctx.payload("cloud", Some(input), params))?;
    Ok(())
}

pub fn profile(ctx: &Ctx, input: &str, out: &str, opts: &ProfileOpts) -> Result<()> {
    tracing::info!(input, out, tag = ?ctx.tag, "profile");
    let loops = read_loops(input, opts.translate)?;
    let mut mesh = ctx.mesh();
    for (i, lp) in loops.iter().enumerate() {
        mesh.add_loop(lp).with_context(|| format!("loop {i} of {input}"))?;
    }
    let (nonmaterial, split, unbounded) = (!opts.keep_nonmaterial, !opts.no_split, !opts.keep_unbounded);
    mesh.triangulate_profile(nonmaterial, split, unbounded)
        .with_context(|| format!("triangulating profile {input}"))?;
    if let Some(limit) = opts.area_limit {
        let n = mesh.triangulate_refine_area(limit, opts.bias, nonmaterial, split, unbounded)?;
        tracing::info!(inserted = n, "refined");
    }
    if let Some(max) = opts.max_edge {
        let n = mesh.split_long_edges(max)?;
        tracing::info!(splits = n, "long edges split");
    }
    write_mesh(&mesh, out)?;
    let params = json!({
        "opts": opts,
        "tolerance": ctx.cfg.coincidence_tolerance,
        "watertight": mesh.is_watertight(),
        "report": report_json(&mesh.report()),
    });
    write_sidecar(out, ctx.payload("profile", Some(input), params))?;
    Ok(())
}

pub fn boundary(ctx: &Ctx, input: &str, out: &str) -> Result<()> {
    tracing::info!(input, out, tag = ?ctx.tag, "boundary");
    let bytes = fs::read(input).with_context(|| format!("reading {input}"))?;
    let doc: MeshDoc = serde_json::from_slice(&bytes).with_context(|| format!("parsing {input}"))?;
    let mut mesh = doc.to_mesh(ctx.cfg)?;
    let loops = mesh.compute_profile().context("reconstructing boundary")?;
    ensure_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {out}"))?;
    mesh.to_p2d(BufWriter::new(file))?;
    let areas: Vec<f64> = mesh.loops().map(|l| l.signed_area).collect();
    let params = json!({ "loops": loops, "signed_areas": areas });
    write_sidecar(out, ctx.payload("boundary", Some(input), params))?;
    Ok(())
}

pub fn simplify(ctx: &Ctx, input: &str, out: &str, arrow: f64, distance: f64) -> Result<()> {
    tracing::info!(input, out, arrow, distance, "simplify");
    let loops = read_loops(input, false)?;
    let opt = LoopOptimizer::new(arrow, distance);
    let simplified: Vec<Vec<Position2D>> = loops.iter().map(|lp| opt.optimize(lp)).collect();
    write_loops(&simplified, out)?;
    let before: usize = loops.iter().map(Vec::len).sum();
    let after: usize = simplified.iter().map(Vec::len).sum();
    let params = json!({
        "arrow": arrow,
        "distance": distance,
        "points_before": before,
        "points_after": after,
    });
    write_sidecar(out, ctx.payload("simplify", Some(input), params))?;
    Ok(())
}

pub fn demo(
    ctx: &Ctx,
    out: &str,
    vertices: usize,
    r_min: f64,
    r_max: f64,
    seed: u64,
    index: u64,
) -> Result<()> {
    tracing::info!(out, vertices, seed, index, "demo");
    let outline = star_polygon(vertices, r_min, r_max, ReplayToken { seed, index });
    write_loops(&[outline], out)?;
    let params = json!({
        "vertices": vertices,
        "r_min": r_min,
        "r_max": r_max,
        "seed": seed,
        "index": index,
    });
    write_sidecar(out, ctx.payload("demo", None, params))?;
    Ok(())
}

pub fn report(ctx: &Ctx) -> Result<()> {
    let obj = json!({
        "code_rev": current_git_rev(),
        "tri2d_version": tri2d::VERSION,
        "tag": ctx.tag,
        "cfg": {
            "coincidence_tolerance": ctx.cfg.coincidence_tolerance,
            "super_margin": ctx.cfg.super_margin,
            "max_repair_cycles": ctx.cfg.max_repair_cycles,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Read `x`,`y` columns from a CSV (header required) or Parquet file.
fn read_points(input: &str) -> Result<Vec<Position2D>> {
    let lf = if input.ends_with(".parquet") {
        LazyFrame::scan_parquet(input, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(input)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y columns from {input}"))?;
    tracing::info!(rows = df.height(), "input_points");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(pos(x, y)),
            _ => Err(anyhow!("{input}: row {row} has a missing coordinate")),
        })
        .collect()
}

fn read_loops(input: &str, translate: bool) -> Result<Vec<Vec<Position2D>>> {
    let file = File::open(input).with_context(|| format!("opening {input}"))?;
    read_p2d(BufReader::new(file), translate).with_context(|| format!("parsing {input}"))
}

fn write_loops(loops: &[Vec<Position2D>], out: &str) -> Result<()> {
    ensure_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {out}"))?;
    write_p2d(BufWriter::new(file), loops)?;
    Ok(())
}

fn write_mesh(mesh: &Mesh, out: &str) -> Result<()> {
    ensure_parent(out)?;
    let doc = MeshDoc::from_mesh(mesh);
    fs::write(out, serde_json::to_vec_pretty(&doc)?).with_context(|| format!("writing {out}"))?;
    Ok(())
}

fn ensure_parent(out: &str) -> Result<()> {
    if let Some(parent) = Path::new(out).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn report_json(r: &MeshReport) -> serde_json::Value {
    json!({
        "vertices": r.vertices,
        "edges": r.edges,
        "triangles": r.triangles,
        "loops": r.loops,
        "boundary_edges": r.boundary_edges,
        "interior_edges": r.interior_edges,
        "nonmanifold_edges": r.nonmanifold_edges,
        "total_area": r.total_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ctx() -> Ctx {
        Ctx::new(None, Some("test".into()))
    }

    fn load(path: &Path) -> MeshDoc {
        serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
    }

    #[test]
    fn cloud_from_csv_writes_mesh_and_sidecar() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("pts.csv");
        fs::write(&csv, "x,y\n0,0\n1,0\n1,1\n0,1\n0.5,0.5\n").unwrap();
        let out = dir.path().join("out/mesh.json");
        cloud(&ctx(), csv.to_str().unwrap(), out.to_str().unwrap(), None, 0.5).unwrap();

        let doc = load(&out);
        assert_eq!(doc.vertices.len(), 5);
        assert_eq!(doc.triangles.len(), 4);
        assert!((doc.total_area - 1.0).abs() < 1e-9);
        assert!(dir.path().join("out/mesh.provenance.json").exists());
    }

    #[test]
    fn demo_profile_boundary_pipeline() {
        let dir = tempdir().unwrap();
        let star = dir.path().join("star.p2d");
        let mesh = dir.path().join("star.json");
        let outline = dir.path().join("outline.p2d");
        demo(&ctx(), star.to_str().unwrap(), 16, 0.5, 1.5, 3, 0).unwrap();

        let opts = ProfileOpts {
            area_limit: Some(0.2),
            ..ProfileOpts::default()
        };
        profile(&ctx(), star.to_str().unwrap(), mesh.to_str().unwrap(), &opts).unwrap();
        let doc = load(&mesh);
        assert_eq!(doc.loops.len(), 1);
        assert!(doc.loops[0].vertices.len() >= 16);
        assert!((doc.total_area - doc.loops[0].signed_area).abs() < 1e-9);

        boundary(&ctx(), mesh.to_str().unwrap(), outline.to_str().unwrap()).unwrap();
        let loops = read_loops(outline.to_str().unwrap(), false).unwrap();
        assert_eq!(loops.len(), 1);
        let area = tri2d::geom2::polygon_signed_area(&loops[0]);
        assert!((area - doc.total_area).abs() < 1e-9);
        assert!(dir.path().join("outline.provenance.json").exists());
    }

    #[test]
    fn simplify_drops_collinear_points() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.p2d");
        let out = dir.path().join("out.p2d");
        fs::write(
            &input,
            "p2d 1 0 0 2 2\np2d_path 5 4\n0 0\n1 0\n2 0\n2 2\n0 2\n",
        )
        .unwrap();
        simplify(&ctx(), input.to_str().unwrap(), out.to_str().unwrap(), 1e-6, 3.0).unwrap();
        let loops = read_loops(out.to_str().unwrap(), false).unwrap();
        assert_eq!(loops[0].len(), 4);
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("x.json");
        let err = profile(&ctx(), "/nonexistent/shape.p2d", out.to_str().unwrap(), &ProfileOpts::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("opening /nonexistent/shape.p2d"));
    }
}
