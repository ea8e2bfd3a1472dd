//! GeoJSON export of a route and its nearby points
//!
//! The collection holds one `LineString` for the route followed by one
//! `Point` per match. Coordinates are `[longitude, latitude]`. Point
//! properties are the label plus the point's attributes, ready for a web
//! map's popup template.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Position, Value as Shape};
use serde_json::json;
use std::fs;
use std::path::Path;
use trailside_core::{Result, ResultExt};
use trailside_geo::{Coordinate, PointOfInterest, Track};

fn position(coordinate: &Coordinate) -> Position {
    vec![coordinate.longitude, coordinate.latitude]
}

fn feature(shape: Shape, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(shape)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// The route as a `LineString` feature
///
/// Properties carry the route name, vertex count, length and the midpoint
/// vertex as the suggested map center.
pub fn route_feature(track: &Track) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), json!("route"));
    properties.insert("name".to_string(), json!(track.name()));
    properties.insert("vertices".to_string(), json!(track.len()));
    properties.insert("length_m".to_string(), json!(track.length_m()));
    properties.insert("center".to_string(), json!(position(&track.midpoint())));

    feature(
        Shape::LineString(track.points().iter().map(position).collect()),
        properties,
    )
}

/// A point of interest as a `Point` feature
pub fn point_feature(point: &PointOfInterest) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), json!("point"));
    properties.insert("label".to_string(), json!(point.label));
    for (key, value) in &point.attributes {
        properties.insert(key.clone(), json!(value));
    }

    feature(Shape::Point(position(&point.location)), properties)
}

/// Route plus points as a `FeatureCollection`
pub fn feature_collection(track: &Track, points: &[PointOfInterest]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: std::iter::once(route_feature(track))
            .chain(points.iter().map(point_feature))
            .collect(),
        foreign_members: None,
    }
}

/// Write a feature collection to `path` as pretty-printed JSON
pub fn write_geojson(path: impl AsRef<Path>, track: &Track, points: &[PointOfInterest]) -> Result<()> {
    let path = path.as_ref();
    let body = serde_json::to_string_pretty(&feature_collection(track, points))?;
    fs::write(path, body).context(format!("Writing GeoJSON to {}", path.display()))
}
