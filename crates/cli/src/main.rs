use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

mod commands;
mod mesh_json;
mod provenance;

use commands::{Ctx, ProfileOpts};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Triangulate point clouds and polygon profiles")]
struct Cmd {
    /// Coincidence tolerance for every mesh built by this run
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Free-form label recorded in provenance sidecars and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Delaunay-triangulate a point cloud (CSV or Parquet with x,y columns) into a JSON mesh
    Cloud {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        /// Refine until no triangle exceeds this area
        #[arg(long)]
        area_limit: Option<f64>,
        #[arg(long, default_value_t = 0.5)]
        bias: f64,
    },
    /// Triangulate the loops of a p2d file into a JSON mesh
    Profile {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[command(flatten)]
        opts: ProfileOpts,
    },
    /// Rebuild boundary loops from a JSON mesh and write them as p2d
    Boundary {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Drop near-collinear loop points from a p2d file
    Simplify {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = 1e-3)]
        arrow: f64,
        #[arg(long, default_value_t = 0.1)]
        distance: f64,
    },
    /// Write a random star-shaped outline as p2d
    Demo {
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = 24)]
        vertices: usize,
        #[arg(long, default_value_t = 0.5)]
        r_min: f64,
        #[arg(long, default_value_t = 1.5)]
        r_max: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let ctx = Ctx::new(cmd.tolerance, cmd.tag);
    match cmd.action {
        Action::Cloud {
            input,
            out,
            area_limit,
            bias,
        } => commands::cloud(&ctx, &input, &out, area_limit, bias),
        Action::Profile { input, out, opts } => commands::profile(&ctx, &input, &out, &opts),
        Action::Boundary { input, out } => commands::boundary(&ctx, &input, &out),
        Action::Simplify {
            input,
            out,
            arrow,
            distance,
        } => commands::simplify(&ctx, &input, &out, arrow, distance),
        Action::Demo {
            out,
            vertices,
            r_min,
            r_max,
            seed,
            index,
        } => commands::demo(&ctx, &out, vertices, r_min, r_max, seed, index),
        Action::Report => commands::report(&ctx),
    }
}
