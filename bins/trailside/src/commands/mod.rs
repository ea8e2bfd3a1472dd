//! CLI command implementations

pub mod distance;
pub mod filter;
pub mod track;

use std::path::{Path, PathBuf};
use trailside_core::{Error, Result, ResultExt};
use trailside_geo::{load_track_file, TailPolicy, Track};
use trailside_telemetry::{metrics, Timer};

/// Flag value, else config value, else a missing-input error
pub(crate) fn resolve_path(flag: Option<&Path>, configured: Option<&Path>, what: &str, arg: &str) -> Result<PathBuf> {
    flag.or(configured)
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::missing_input(what, arg))
}

pub(crate) fn tail_policy(keep_last_flag: bool, configured: TailPolicy) -> TailPolicy {
    if keep_last_flag {
        TailPolicy::Keep
    } else {
        configured
    }
}

/// Load a route and its down-sampled form
pub(crate) fn load_route(path: &Path, stride: usize, tail: TailPolicy) -> Result<(Track, Track)> {
    let timer = Timer::start("route.load");
    let track = load_track_file(path).context(format!("Loading route {}", path.display()))?;
    timer.stop();

    let sampled = track
        .downsample_with(stride, tail)
        .context(format!("Down-sampling with stride {}", stride))?;

    metrics().gauge("route.vertices", track.len() as u64);
    metrics().gauge("route.sampled_vertices", sampled.len() as u64);
    tracing::info!(
        vertices = track.len(),
        sampled = sampled.len(),
        stride,
        "Route ready"
    );

    Ok((track, sampled))
}
