#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for road accident analytics.
//!
//! Loads one CSV extract into memory, then answers a single query against
//! it. Log output goes through `indicatif-log-bridge` (via
//! [`road_accidents_cli_utils::init_logger`]) so the load progress bar
//! and log lines don't interleave.

mod output;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use road_accidents_accident_models::BoundingBox;
use road_accidents_analytics::{AccidentSummary, QueryEngine, engine::checked_k};
use road_accidents_cli_utils::IndicatifProgress;
use road_accidents_source::{LoadOptions, default_dataset, load_accidents, load_dataset_file};

use crate::output::{
    OutputFormat, render_accidents, render_counts, render_groups, render_ranking, render_summary,
};

/// Environment variable consulted when `--data` is not given.
const DATA_ENV: &str = "ROAD_ACCIDENTS_DATA";

#[derive(Parser)]
#[command(name = "road_accidents", about = "Road accident analytics over a CSV extract")]
struct Cli {
    /// Accident CSV file, optionally `.gz` (defaults to `$ROAD_ACCIDENTS_DATA`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Dataset definition TOML (defaults to the built-in STATS19 layout)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// Maximum number of accidents to load (for testing)
    #[arg(long, global = true)]
    limit: Option<u64>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an accident by its identifier
    Find {
        /// Accident identifier (e.g., "`200501BS00001`")
        id: String,
    },
    /// List accidents inside an inclusive longitude/latitude box
    Bbox {
        /// Western edge
        #[arg(allow_negative_numbers = true)]
        min_lon: f64,
        /// Eastern edge
        #[arg(allow_negative_numbers = true)]
        max_lon: f64,
        /// Southern edge
        #[arg(allow_negative_numbers = true)]
        min_lat: f64,
        /// Northern edge
        #[arg(allow_negative_numbers = true)]
        max_lat: f64,
    },
    /// Count accidents per road surface condition
    Surfaces,
    /// Rank weather conditions by number of accidents
    Weather {
        /// Number of conditions to show
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        top: i64,
    },
    /// Group accident identifiers by district authority
    Authorities,
    /// Print every aggregate at once
    Summary {
        /// Number of weather conditions to show
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        top: i64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = road_accidents_cli_utils::init_logger();
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let data = cli
        .data
        .or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from))
        .ok_or_else(|| format!("No data file given: pass --data or set {DATA_ENV}"))?;

    let definition = match &cli.dataset {
        Some(path) => load_dataset_file(path)?,
        None => default_dataset(),
    };

    let start = Instant::now();
    let progress = IndicatifProgress::rows_bar(&multi, "Loading accidents");
    let loaded = load_accidents(
        &data,
        &definition,
        LoadOptions { limit: cli.limit },
        &progress,
    )?;
    log::info!(
        "Loaded {} accidents ({} skipped) in {:.1}s",
        loaded.accidents.len(),
        loaded.skipped,
        start.elapsed().as_secs_f64()
    );

    let engine = QueryEngine::new(&loaded.accidents);

    let rendered = match cli.command {
        Commands::Find { id } => {
            let accident = engine.require_by_identifier(&id)?;
            render_accidents(&[accident], format)?
        }
        Commands::Bbox {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        } => {
            let bbox = BoundingBox::new(min_lon, max_lon, min_lat, max_lat);
            if bbox.is_degenerate() {
                log::warn!("Bounding box {bbox:?} is empty or contains NaN; nothing can match");
            }
            render_accidents(&engine.filter_by_bounding_box(&bbox), format)?
        }
        Commands::Surfaces => render_counts(
            "ROAD SURFACE",
            &engine.count_by_road_surface_condition(),
            format,
        )?,
        Commands::Weather { top } => {
            render_ranking(&engine.top_weather_condition_counts(checked_k(top)?), format)?
        }
        Commands::Authorities => render_groups(&engine.group_identifiers_by_authority(), format)?,
        Commands::Summary { top } => {
            render_summary(&AccidentSummary::build(&engine, checked_k(top)?), format)?
        }
    };

    print!("{rendered}");

    Ok(())
}
