//! GPX track loading and down-sampling.
//!
//! A [`Track`] is the ordered list of `trkpt` coordinates of a GPX document,
//! taken from every track and segment in document order. Route points and
//! standalone waypoints are ignored.
//!
//! Documents are read with the `gpx` crate first. When it rejects a document
//! that is still well-formed XML (no `version` attribute, extension children
//! such as `<speed>`, an unparseable `<time>`), the track points are scanned
//! straight from the XML events instead, since only `lat`/`lon` matter here.

use crate::{distance, Coordinate, GeoError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, XmlEvent};

const GPX_NAMESPACES: [&str; 2] = [
    "http://www.topografix.com/GPX/1/1",
    "http://www.topografix.com/GPX/1/0",
];

/// What to do with the final vertex when striding skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailPolicy {
    /// Plain uniform striding; the last vertex is kept only if it falls on the stride.
    #[default]
    Drop,
    /// Append the last vertex when striding skipped it.
    Keep,
}

/// An ordered, non-empty path of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    points: Vec<Coordinate>,
}

impl Track {
    /// Creates a track from coordinates in path order.
    ///
    /// Fails with [`GeoError::EmptyTrack`] when `points` is empty.
    pub fn new(points: Vec<Coordinate>) -> Result<Self> {
        if points.is_empty() {
            return Err(GeoError::EmptyTrack);
        }
        Ok(Self { name: None, points })
    }

    /// Attaches a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Track name from the source document, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Vertices in path order.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed track; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First vertex of the path.
    pub fn first(&self) -> Coordinate {
        self.points[0]
    }

    /// Last vertex of the path.
    pub fn last(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// Vertex at index `len / 2`, used as the default map center.
    pub fn midpoint(&self) -> Coordinate {
        self.points[self.points.len() / 2]
    }

    /// Path length in meters, summed over consecutive vertices.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| distance(&pair[0], &pair[1]))
            .sum()
    }

    /// Keeps vertices at indices `0, stride, 2*stride, ...`.
    ///
    /// The final vertex is not forced in; see [`Track::downsample_with`].
    /// A stride of 1 returns an equal track.
    ///
    /// # Example
    /// ```
    /// use trailside_geo::{Coordinate, Track};
    ///
    /// let track = Track::new((0..10).map(|i| Coordinate::new(37.5, 127.0 + i as f64 * 1e-4)).collect()).unwrap();
    /// let sampled = track.downsample(3).unwrap();
    /// assert_eq!(sampled.len(), 4); // indices 0, 3, 6, 9
    /// ```
    pub fn downsample(&self, stride: usize) -> Result<Track> {
        self.downsample_with(stride, TailPolicy::Drop)
    }

    /// Down-samples with an explicit policy for the final vertex.
    pub fn downsample_with(&self, stride: usize, tail: TailPolicy) -> Result<Track> {
        if stride == 0 {
            return Err(GeoError::invalid_argument("stride must be at least 1"));
        }

        let mut points: Vec<Coordinate> = self.points.iter().step_by(stride).copied().collect();

        let last_index = self.points.len() - 1;
        if tail == TailPolicy::Keep && last_index % stride != 0 {
            points.push(self.last());
        }

        debug!(
            original = self.points.len(),
            sampled = points.len(),
            stride,
            "Down-sampled track"
        );

        Ok(Track {
            name: self.name.clone(),
            points,
        })
    }
}

impl AsRef<[Coordinate]> for Track {
    fn as_ref(&self) -> &[Coordinate] {
        &self.points
    }
}

/// Parses a GPX document into a [`Track`].
///
/// Fails with [`GeoError::Parse`] if the input is not well-formed XML or a
/// `trkpt` lacks a numeric `lat`/`lon`, and with [`GeoError::EmptyTrack`] if
/// it has no track points.
#[instrument(skip_all)]
pub fn load_track<R: Read>(mut reader: R) -> Result<Track> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;

    let (name, points) = match gpx::read(source.as_slice()) {
        Ok(document) => {
            let name = document.tracks.iter().find_map(|t| t.name.clone());
            let points: Vec<Coordinate> = document
                .tracks
                .iter()
                .flat_map(|t| &t.segments)
                .flat_map(|s| &s.points)
                .map(|waypoint| {
                    let point = waypoint.point();
                    Coordinate::new(point.y(), point.x())
                })
                .collect();
            (name, points)
        }
        Err(strict) => {
            debug!(error = %strict, "GPX reader rejected document, scanning XML");
            let scanned = scan_track_points(source.as_slice())?;
            if !scanned.1.is_empty() {
                warn!(error = %strict, "Route is not strict GPX; read track points from raw XML");
            }
            scanned
        }
    };

    let mut track = Track::new(points)?;
    if let Some(name) = name {
        track = track.with_name(name);
    }

    info!(
        points = track.len(),
        name = track.name().unwrap_or("<unnamed>"),
        "Loaded track"
    );

    Ok(track)
}

/// Collects `trkpt` coordinates and the first track name from raw XML events.
fn scan_track_points<R: Read>(reader: R) -> Result<(Option<String>, Vec<Coordinate>)> {
    let mut name = None;
    let mut open: Vec<String> = Vec::new();
    let mut points = Vec::new();

    for event in EventReader::new(reader) {
        match event.map_err(|e| GeoError::Parse(e.to_string()))? {
            XmlEvent::StartElement {
                name: element,
                attributes,
                ..
            } => {
                let in_gpx = element
                    .namespace
                    .as_deref()
                    .is_some_and(|ns| GPX_NAMESPACES.contains(&ns));
                if in_gpx && element.local_name == "trkpt" {
                    points.push(trkpt_coordinate(&attributes)?);
                }
                open.push(element.local_name);
            }
            XmlEvent::EndElement { .. } => {
                open.pop();
            }
            XmlEvent::Characters(text) if name.is_none() => {
                if matches!(open.as_slice(), [.., parent, leaf] if parent == "trk" && leaf == "name") {
                    name = Some(text.trim().to_string());
                }
            }
            _ => {}
        }
    }

    Ok((name, points))
}

fn trkpt_coordinate(attributes: &[OwnedAttribute]) -> Result<Coordinate> {
    let value = |key: &str| -> Result<f64> {
        let raw = attributes
            .iter()
            .find(|a| a.name.namespace.is_none() && a.name.local_name == key)
            .map(|a| a.value.trim())
            .ok_or_else(|| GeoError::Parse(format!("trkpt lacks required attribute {}", key)))?;
        raw.parse()
            .map_err(|_| GeoError::Parse(format!("trkpt {} is not a number: {:?}", key, raw)))
    };
    Ok(Coordinate::new(value("lat")?, value("lon")?))
}

/// Parses a GPX document held in memory.
pub fn load_track_str(source: &str) -> Result<Track> {
    load_track(source.as_bytes())
}

/// Opens and parses a GPX file.
///
/// I/O failures surface as [`GeoError::Io`], not as parse errors.
pub fn load_track_file(path: impl AsRef<Path>) -> Result<Track> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Opening track file");
    let file = File::open(path)?;
    load_track(BufReader::new(file))
}
