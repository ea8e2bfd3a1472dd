//! `trailside filter`: points within a radius of the route

use super::{load_route, resolve_path, tail_policy};
use crate::FilterArgs;
use anyhow::Result;
use serde_json::json;
use trailside_cli::output::{filter_summary, format_count, format_duration, Status};
use trailside_cli::{geojson, progress};
use trailside_core::config::{Config, PointsConfig};
use trailside_core::{Error, ResultExt};
use trailside_geo::{validate_radius, FilterCache, FilterCacheConfig};
use trailside_points::read_csv_file;
use trailside_telemetry::{metrics, Timer};

/// Run the filter command
pub fn run(args: &FilterArgs, config: &Config) -> Result<()> {
    trailside_telemetry::timed_span!("command.filter");
    let schema = &config.schema;

    let route_path = resolve_path(
        args.route.as_deref(),
        schema.route.path.as_deref(),
        "route file",
        "--route",
    )?;
    let points_path = resolve_path(
        args.points.as_deref(),
        schema.points.path.as_deref(),
        "point source",
        "--points",
    )?;

    let radius_m = args.radius.unwrap_or(schema.filter.radius_m);
    validate_radius(radius_m).with_suggestion("--radius takes a positive number of meters")?;
    let stride = args.stride.unwrap_or(schema.route.stride);
    let tail = tail_policy(args.keep_last, schema.route.tail_policy());
    let limit = args.limit.unwrap_or(schema.filter.max_markers);
    let parallel = args.parallel || schema.filter.parallel;

    let mut mapping = match &args.preset {
        Some(preset) => PointsConfig {
            preset: Some(preset.clone()),
            ..schema.points.clone()
        }
        .column_mapping()?,
        None => schema.points.column_mapping()?,
    };
    if let Some(encoding) = &args.encoding {
        mapping = mapping.with_encoding(encoding.clone());
        mapping.decoder().map_err(Error::from)?;
    }

    let spinner = if args.json {
        progress::hidden()
    } else {
        progress::spinner("Loading route...")
    };

    let (track, sampled) = load_route(&route_path, stride, tail)?;

    spinner.set_message("Loading points...");
    let timer = Timer::start("points.load");
    let source = read_csv_file(&points_path, &mapping)
        .context(format!("Loading points {}", points_path.display()))?;
    timer.stop();
    metrics().increment_by("points.rows_read", source.rows_read as u64);
    metrics().increment_by("points.dropped", source.dropped as u64);

    spinner.set_message("Filtering...");
    let timer = Timer::start("filter");
    let cache = FilterCache::new(FilterCacheConfig {
        parallel,
        ..FilterCacheConfig::default()
    });
    let result = cache
        .get_or_compute(&source.points, sampled.points(), radius_m)
        .map_err(Error::from)?;
    let elapsed = timer.stop();
    metrics().increment_by("filter.matches", result.len() as u64);
    progress::finish_clear(&spinner);

    let shown = result.truncated(limit);

    if args.json {
        let output = json!({
            "route": {
                "name": track.name(),
                "vertices": track.len(),
                "sampled_vertices": sampled.len(),
                "stride": stride,
            },
            "points_read": source.rows_read,
            "points_dropped": source.dropped,
            "radius_m": result.radius_m(),
            "matches": result.len(),
            "limit": limit,
            "points": shown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        Status::header(track.name().unwrap_or("Route"));
        Status::info(&format!(
            "{} ({} used), {} loaded, {} dropped",
            format_count(track.len(), "vertex", "vertices"),
            sampled.len(),
            format_count(source.points.len(), "point", "points"),
            source.dropped
        ));
        Status::success(&format!(
            "{} in {}",
            filter_summary(result.len(), result.radius_m(), limit),
            format_duration(elapsed)
        ));
        for (index, point) in shown.iter().enumerate() {
            Status::point(index + 1, point);
        }
        if result.len() > shown.len() {
            Status::info(&format!("{} more not shown", result.len() - shown.len()));
        }
    }

    if let Some(out) = &args.geojson {
        geojson::write_geojson(out, &track, shown)?;
        if !args.json {
            Status::success(&format!("Wrote {}", out.display()));
        }
    }

    Ok(())
}
