//! Plain-text p2d dump of profile loops.
//!
//! Format
//! ```text
//! p2d <loop_count> <minx> <miny> <maxx> <maxy>
//! p2d_path <point_count> <signed_area>
//! <x> <y>
//! ...
//! ```
//! Floats are written with Rust's shortest round-trip formatting, so a dump
//! reads back bit-identical. Blank lines are ignored on read.

use std::io::{BufRead, Write};
use std::str::SplitWhitespace;

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::geom2::{polygon_signed_area, BoundingBox2D, Position2D, Vector2D};
use crate::mesh::Mesh;

/// Write loops (one point list each, no repeated closing point).
pub fn write_p2d<W: Write>(mut writer: W, loops: &[Vec<Position2D>]) -> Result<()> {
    let bbox = BoundingBox2D::from_points(loops.iter().flatten());
    let (min, max) = if bbox.is_empty() {
        (Position2D::origin(), Position2D::origin())
    } else {
        (bbox.min, bbox.max)
    };
    writeln!(writer, "p2d {} {} {} {} {}", loops.len(), min.x, min.y, max.x, max.y)?;
    for lp in loops {
        writeln!(writer, "p2d_path {} {}", lp.len(), polygon_signed_area(lp))?;
        for p in lp {
            writeln!(writer, "{} {}", p.x, p.y)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read loops back. With `translate_to_first_quadrant`, every point is
/// shifted by the same offset so that no coordinate is negative.
pub fn read_p2d<R: BufRead>(reader: R, translate_to_first_quadrant: bool) -> Result<Vec<Vec<Position2D>>> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, l)| l.map(|l| (i + 1, l)))
        .filter(|r| r.as_ref().map_or(true, |(_, l)| !l.trim().is_empty()));

    let (line_no, header) = lines.next().transpose()?.ok_or_else(|| MeshError::parse(1, "empty input"))?;
    let mut tok = header.split_whitespace();
    expect_keyword(&mut tok, "p2d", line_no)?;
    let loop_count: usize = field(&mut tok, "loop count", line_no)?;

    let mut loops = Vec::with_capacity(loop_count);
    for _ in 0..loop_count {
        let (line_no, path) = lines
            .next()
            .transpose()?
            .ok_or_else(|| MeshError::parse(line_no, "missing p2d_path line"))?;
        let mut tok = path.split_whitespace();
        expect_keyword(&mut tok, "p2d_path", line_no)?;
        let n: usize = field(&mut tok, "point count", line_no)?;
        let mut pts = Vec::with_capacity(n);
        for _ in 0..n {
            let (line_no, coords) = lines
                .next()
                .transpose()?
                .ok_or_else(|| MeshError::parse(line_no, "truncated point list"))?;
            let mut tok = coords.split_whitespace();
            let x: f64 = field(&mut tok, "x", line_no)?;
            let y: f64 = field(&mut tok, "y", line_no)?;
            pts.push(Position2D::new(x, y));
        }
        loops.push(pts);
    }

    if translate_to_first_quadrant {
        let bbox = BoundingBox2D::from_points(loops.iter().flatten());
        if !bbox.is_empty() {
            let shift = Vector2D::new((-bbox.min.x).max(0.0), (-bbox.min.y).max(0.0));
            for p in loops.iter_mut().flatten() {
                *p += shift;
            }
            debug!(dx = shift.x, dy = shift.y, "p2d translated");
        }
    }
    Ok(loops)
}

fn expect_keyword(tok: &mut SplitWhitespace<'_>, keyword: &str, line: usize) -> Result<()> {
    match tok.next() {
        Some(k) if k == keyword => Ok(()),
        other => Err(MeshError::parse(
            line,
            format!("expected `{keyword}`, found `{}`", other.unwrap_or("")),
        )),
    }
}

fn field<T: std::str::FromStr>(tok: &mut SplitWhitespace<'_>, what: &str, line: usize) -> Result<T> {
    let raw = tok
        .next()
        .ok_or_else(|| MeshError::parse(line, format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| MeshError::parse(line, format!("invalid {what} `{raw}`")))
}

impl Mesh {
    /// Build a mesh whose profile holds the loops of a p2d dump.
    pub fn from_p2d<R: BufRead>(reader: R, translate_to_first_quadrant: bool) -> Result<Mesh> {
        let mut mesh = Mesh::new();
        for lp in read_p2d(reader, translate_to_first_quadrant)? {
            mesh.add_loop(&lp)?;
        }
        Ok(mesh)
    }

    /// Dump the profile loops (material order).
    pub fn to_p2d<W: Write>(&self, writer: W) -> Result<()> {
        write_p2d(writer, &self.loop_points())
    }
}
