//! find_nearest — nearest point of interest to a coordinate.
//!
//! Loads candidate places from a file, builds a star graph around the given
//! coordinate, runs the selected search engine, and prints a JSON payload on
//! stdout.  Logs go to stderr (`RUST_LOG` controls the level).
//!
//! ```text
//! find_nearest --lat -2.5297 --lng -44.3028 --places data/sao_luis.csv \
//!              --config data/find_nearest.toml
//! ```
//!
//! Exit codes: 0 found, 2 nothing within reach, 1 anything else.

mod config;
mod places;
mod response;


use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Result, ensure};
use clap::Parser;
use log::{error, info};
use serde::Serialize;

use nr_core::GeoPoint;
use nr_graph::{Algorithm, find_nearest_expanding};

use config::AppConfig;
use places::load_candidates;
use response::{ErrorResponse, FindNearestResponse};

/// Find the nearest point of interest to a coordinate.
#[derive(Parser, Debug)]
#[command(name = "find_nearest", version, about, long_about = None)]
struct Args {
    /// User latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// User longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,

    /// Candidate places (.csv or .json)
    #[arg(long)]
    places: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search engine: dijkstra or breadth-first
    #[arg(long)]
    algorithm: Option<Algorithm>,

    /// Search radius in km; repeat to widen step by step
    #[arg(long = "radius-km")]
    radius_km: Vec<f64>,

    /// Assumed travel speed for the time estimate
    #[arg(long)]
    speed_kmh: Option<f64>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let user = GeoPoint::new(args.lat, args.lng);
    ensure!(user.is_finite(), "latitude and longitude must be numbers");

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_overrides(args.algorithm, &args.radius_km, args.speed_kmh);
    config.validate()?;

    let candidates = load_candidates(&args.places)?;
    info!(
        "{} candidates from {}, user at {user}, algorithm {}",
        candidates.len(),
        args.places.display(),
        config.algorithm
    );

    let t0 = Instant::now();
    let found = find_nearest_expanding(user, &candidates, &config.radii_km, config.algorithm);
    let elapsed = t0.elapsed();

    let Some(nearest) = found else {
        info!("no candidate within reach");
        print_json(&ErrorResponse::new("no point of interest found nearby"))?;
        return Ok(ExitCode::from(2));
    };

    info!(
        "nearest: {} at {:.3} km ({} nodes explored)",
        nearest.candidate.name, nearest.result.total_distance_km, nearest.result.stats.nodes_settled
    );
    let body = FindNearestResponse::new(&nearest, candidates.len(), config.speed_kmh, elapsed);
    print_json(&body)?;
    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(body: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, body)?;
    writeln!(out)?;
    Ok(())
}
