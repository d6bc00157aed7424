// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Builds a heatmap grid from synthetic geographic clusters.
//!
//! ```text
//! cargo run --package demos --bin heatmap_grid -- --points 5000 --output grid.bin
//! ```

use std::f64::consts::TAU;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use heatgrid::DensityGrid;
use heatgrid::Point;
use heatgrid::normalize_points;
use heatgrid::projection::Projection;
use heatgrid::projection::WebMercator;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Cluster centers as (longitude, latitude, spread in degrees).
const CLUSTERS: [(f64, f64, f64); 4] = [
    (-122.42, 37.77, 0.08),
    (-122.27, 37.80, 0.05),
    (-121.89, 37.34, 0.10),
    (-122.03, 37.97, 0.04),
];

#[derive(Parser)]
#[command(name = "heatmap_grid", about = "Build a density heatmap grid from synthetic points")]
struct Args {
    /// Number of synthetic points to generate
    #[arg(long, default_value_t = 2000)]
    points: usize,

    /// Number of grid cells along each axis
    #[arg(long, default_value_t = 100)]
    resolution: usize,

    /// Variance of the Gaussian kernel, in normalized units squared
    #[arg(long, default_value_t = 5e-5)]
    sigma_sq: f64,

    /// Neighborhood half-width, in cells
    #[arg(long, default_value_t = 2)]
    neighborhood: usize,

    /// Map cells through ln(1 + v) before reporting
    #[arg(long)]
    log_scale: bool,

    /// Write the serialized grid to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log filter
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(fmt::layer().without_time())
        .init();
}

/// Scatters `count` points around the cluster centers.
///
/// Uses additive recurrences instead of a random source so runs are reproducible.
fn synthetic_points(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let (lon, lat, spread) = CLUSTERS[i % CLUSTERS.len()];
            let u = (i as f64 * 0.618_033_988_75).fract();
            let v = (i as f64 * 0.754_877_666_25).fract();
            let radius = spread * u.sqrt();
            let angle = TAU * v;
            Point::new(lon + radius * angle.cos(), lat + radius * angle.sin())
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let lon_lat = synthetic_points(args.points);
    tracing::info!(points = lon_lat.len(), "generated synthetic points");

    let projected = WebMercator.project_all(&lon_lat)?;
    let normalized = normalize_points(&projected)?;
    tracing::info!("points projected and normalized");

    let mut grid = DensityGrid::builder()
        .resolution(args.resolution)
        .sigma_sq(args.sigma_sq)
        .neighborhood(args.neighborhood)
        .build(&normalized)?;
    if args.log_scale {
        grid = grid.log_scaled();
    }

    let occupied = grid.values().iter().filter(|v| **v > 0.0).count();
    tracing::info!(
        resolution = grid.resolution(),
        occupied,
        max = grid.max(),
        sum = grid.sum(),
        "built density grid"
    );

    let mut hottest: Vec<_> = grid.iter().collect();
    hottest.sort_by(|a, b| b.2.total_cmp(&a.2));
    for (row, col, value) in hottest.into_iter().take(5) {
        println!("cell ({row:>3}, {col:>3}): {value:.4}");
    }

    if let Some(path) = &args.output {
        let bytes = grid.serialize();
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write grid to {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote serialized grid");
    }
    Ok(())
}
