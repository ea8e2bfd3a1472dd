//! `trailside distance`: haversine distance between two coordinates

use anyhow::Result;
use trailside_core::Error;
use trailside_geo::{distance, Coordinate};

/// Run the distance command
pub fn run(from: (f64, f64), to: (f64, f64)) -> Result<()> {
    let from = Coordinate::from(from);
    let to = Coordinate::from(to);

    for c in [&from, &to] {
        if !c.is_valid() {
            return Err(Error::validation(format!(
                "({}, {}) is not a valid latitude/longitude",
                c.latitude, c.longitude
            ))
            .with_suggestion("Latitude must be within [-90, 90] and longitude within [-180, 180]")
            .into());
        }
    }

    println!("{:.3}", distance(&from, &to));
    Ok(())
}
