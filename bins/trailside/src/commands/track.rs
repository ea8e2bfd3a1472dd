//! `trailside track`: route summary

use super::{load_route, resolve_path, tail_policy};
use crate::TrackArgs;
use anyhow::Result;
use serde_json::json;
use trailside_cli::output::{format_coordinate, format_count, format_distance, Status};
use trailside_core::config::Config;

/// Run the track command
pub fn run(args: &TrackArgs, config: &Config) -> Result<()> {
    trailside_telemetry::timed_span!("command.track");
    let schema = &config.schema;

    let route_path = resolve_path(
        args.route.as_deref(),
        schema.route.path.as_deref(),
        "route file",
        "--route",
    )?;
    let stride = args.stride.unwrap_or(schema.route.stride);
    let tail = tail_policy(args.keep_last, schema.route.tail_policy());

    let (track, sampled) = load_route(&route_path, stride, tail)?;

    if args.json {
        let output = json!({
            "name": track.name(),
            "vertices": track.len(),
            "stride": stride,
            "sampled_vertices": sampled.len(),
            "length_m": track.length_m(),
            "first": track.first(),
            "midpoint": track.midpoint(),
            "last": track.last(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header(track.name().unwrap_or("Route"));
    println!("  Vertices: {}", track.len());
    println!(
        "  Sampled:  {} (stride {})",
        format_count(sampled.len(), "vertex", "vertices"),
        stride
    );
    println!("  Length:   {}", format_distance(track.length_m()));
    println!("  Start:    {}", format_coordinate(&track.first()));
    println!("  Midpoint: {}", format_coordinate(&track.midpoint()));
    println!("  Finish:   {}", format_coordinate(&track.last()));

    Ok(())
}
