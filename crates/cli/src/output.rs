//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use trailside_geo::{Coordinate, PointOfInterest};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a dimmed hint below an error
    pub fn hint(message: &str) {
        eprintln!("  {}", message.dimmed());
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print one numbered match with its attributes
    pub fn point(index: usize, point: &PointOfInterest) {
        println!(
            "{} {} {}",
            format!("{:>3}.", index).dimmed(),
            point.label,
            format_coordinate(&point.location).dimmed()
        );
        for (key, value) in &point.attributes {
            println!("     {} {}", format!("{}:", key).cyan(), value);
        }
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a distance in meters for display
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.1} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Format a coordinate as `(lat, lon)` with six decimals
pub fn format_coordinate(coordinate: &Coordinate) -> String {
    format!("({:.6}, {:.6})", coordinate.latitude, coordinate.longitude)
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// One-line summary of a filter run
pub fn filter_summary(matches: usize, radius_m: f64, limit: usize) -> String {
    format!(
        "{} within {} m, showing at most {}",
        format_count(matches, "point", "points"),
        radius_m,
        limit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(44.108), "44.1 m");
        assert_eq!(format_distance(1071.86), "1.07 km");
        assert_eq!(format_distance(0.0), "0.0 m");
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(
            format_coordinate(&Coordinate::new(37.5665, 126.978)),
            "(37.566500, 126.978000)"
        );
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "point", "points"), "1 point");
        assert_eq!(format_count(0, "point", "points"), "0 points");
    }

    #[test]
    fn test_filter_summary() {
        assert_eq!(
            filter_summary(12, 40.0, 50),
            "12 points within 40 m, showing at most 50"
        );
        assert_eq!(
            filter_summary(1, 12.5, 50),
            "1 point within 12.5 m, showing at most 50"
        );
    }
}
