//! Terminal and export helpers for Trailside
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Progress spinners
//! - GeoJSON export for web maps

#![warn(missing_docs)]

pub mod geojson;
pub mod output;
pub mod progress;
