//! trailside: find points of interest near a GPX route
//!
//! Loads a track, down-samples it, and keeps the points from a CSV source
//! that lie within a radius of any remaining track vertex.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use trailside_cli::output::Status;
use trailside_core::config::Config;
use trailside_core::error::exit_codes;
use trailside_telemetry::{LogFormat, TelemetryConfig};

mod commands;

/// Route-proximity filtering for GPX tracks
#[derive(Parser)]
#[command(name = "trailside")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to trailside.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print collected metrics as JSON to stderr before exiting
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep the points that lie within a radius of the route
    Filter(FilterArgs),

    /// Summarize a route and its down-sampled form
    Track(TrackArgs),

    /// Great-circle distance in meters between two coordinates
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },
}

/// Options for `trailside filter`
#[derive(Args)]
pub struct FilterArgs {
    /// GPX route file
    #[arg(short, long)]
    pub route: Option<PathBuf>,

    /// CSV file of candidate points
    #[arg(short, long)]
    pub points: Option<PathBuf>,

    /// Inclusion radius in meters
    #[arg(long, allow_negative_numbers = true)]
    pub radius: Option<f64>,

    /// Keep every Nth route vertex
    #[arg(long)]
    pub stride: Option<usize>,

    /// Always keep the final route vertex when down-sampling
    #[arg(long)]
    pub keep_last: bool,

    /// Show and export at most this many matches
    #[arg(long)]
    pub limit: Option<usize>,

    /// Built-in column layout of the point source (default, seoul-restrooms)
    #[arg(long)]
    pub preset: Option<String>,

    /// Text encoding of the point source (utf-8, euc-kr, ...)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Filter in parallel chunks
    #[arg(long)]
    pub parallel: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the route and shown matches as a GeoJSON FeatureCollection
    #[arg(long, value_name = "OUT")]
    pub geojson: Option<PathBuf>,
}

/// Options for `trailside track`
#[derive(Args)]
pub struct TrackArgs {
    /// GPX route file
    #[arg(short, long)]
    pub route: Option<PathBuf>,

    /// Keep every Nth route vertex
    #[arg(long)]
    pub stride: Option<usize>,

    /// Always keep the final route vertex when down-sampling
    #[arg(long)]
    pub keep_last: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = match &cli.command {
        Commands::Filter(args) => args.json,
        Commands::Track(args) => args.json,
        Commands::Distance { .. } => false,
    };

    let code = match run(cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => report(&err, json),
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    trailside_telemetry::init_with_config(TelemetryConfig {
        format: if config.schema.logging.json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        },
        ..TelemetryConfig::with_level(level)
    })?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let result = match cli.command {
        Commands::Filter(args) => commands::filter::run(&args, &config),
        Commands::Track(args) => commands::track::run(&args, &config),
        Commands::Distance { lat1, lon1, lat2, lon2 } => {
            commands::distance::run((lat1, lon1), (lat2, lon2))
        }
    };

    if cli.metrics {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&trailside_telemetry::metrics().export_json())?
        );
    }

    result
}

/// Print an error and pick the exit code for it
///
/// In JSON mode the error report goes to stdout in place of the result.
fn report(err: &anyhow::Error, json: bool) -> i32 {
    match err.downcast_ref::<trailside_core::Error>() {
        Some(e) if json => {
            match serde_json::to_string_pretty(&e.to_report()) {
                Ok(report) => println!("{}", report),
                Err(_) => Status::error(&format!("[{}] {}", e.code, e.message)),
            }
            e.exit_code()
        }
        Some(e) => {
            Status::error(&format!("[{}] {}", e.code, e.message));
            if let Some(context) = &e.context {
                Status::hint(context);
            }
            if let Some(suggestion) = &e.suggestion {
                Status::hint(&format!("Suggestion: {}", suggestion));
            }
            e.exit_code()
        }
        None => {
            Status::error(&format!("{:#}", err));
            exit_codes::FAILURE
        }
    }
}
