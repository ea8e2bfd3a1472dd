//! Row normalization and the drop-on-missing policy.

use crate::ColumnMapping;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use trailside_geo::{Coordinate, PointOfInterest};
use tracing::{debug, info};

/// A raw source row: column name to cell text.
pub type RawRow = HashMap<String, String>;

/// Why a row was discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// Label column absent or blank
    MissingLabel,
    /// Coordinate column absent or blank
    MissingField(&'static str),
    /// Coordinate cell is not a number
    Unparseable { field: &'static str, value: String },
    /// Parsed coordinate outside [-90,90] x [-180,180] or not finite
    OutOfRange(Coordinate),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingLabel => write!(f, "missing label"),
            DropReason::MissingField(field) => write!(f, "missing {}", field),
            DropReason::Unparseable { field, value } => {
                write!(f, "unparseable {} '{}'", field, value)
            }
            DropReason::OutOfRange(c) => {
                write!(f, "coordinate out of range ({}, {})", c.latitude, c.longitude)
            }
        }
    }
}

/// Result of normalizing a batch of rows.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Complete records in source order
    pub points: Vec<PointOfInterest>,
    /// Rows seen
    pub rows_read: usize,
    /// Rows discarded
    pub dropped: usize,
}

/// Normalizes one row given a cell lookup by column name.
pub(crate) fn normalize_fields<'a>(
    cell: impl Fn(&str) -> Option<&'a str>,
    mapping: &ColumnMapping,
) -> Result<PointOfInterest, DropReason> {
    let present = |column: &str| cell(column).map(str::trim).filter(|v| !v.is_empty());

    let label = present(mapping.label.as_str()).ok_or(DropReason::MissingLabel)?;
    let latitude = parse_coordinate(present(mapping.latitude.as_str()), "latitude")?;
    let longitude = parse_coordinate(present(mapping.longitude.as_str()), "longitude")?;

    let location = Coordinate::new(latitude, longitude);
    if !location.is_valid() {
        return Err(DropReason::OutOfRange(location));
    }

    let attributes: BTreeMap<String, String> = mapping
        .attributes
        .iter()
        .filter_map(|column| present(column.as_str()).map(|v| (column.clone(), v.to_string())))
        .collect();

    Ok(PointOfInterest {
        label: label.to_string(),
        location,
        attributes,
    })
}

fn parse_coordinate(value: Option<&str>, field: &'static str) -> Result<f64, DropReason> {
    let value = value.ok_or(DropReason::MissingField(field))?;
    value.parse::<f64>().map_err(|_| DropReason::Unparseable {
        field,
        value: value.to_string(),
    })
}

/// Normalizes a single raw row.
pub fn normalize_row(row: &RawRow, mapping: &ColumnMapping) -> Result<PointOfInterest, DropReason> {
    normalize_fields(|column| row.get(column).map(String::as_str), mapping)
}

/// Normalizes raw rows, dropping incomplete ones.
///
/// Dropping is policy, not failure: each drop is logged at debug level and
/// counted in [`Normalized::dropped`].
pub fn normalize<I>(rows: I, mapping: &ColumnMapping) -> Normalized
where
    I: IntoIterator<Item = RawRow>,
{
    let mut outcome = Normalized::default();

    for (index, row) in rows.into_iter().enumerate() {
        outcome.record(index + 1, normalize_row(&row, mapping));
    }

    outcome.log_summary();
    outcome
}

impl Normalized {
    pub(crate) fn record(&mut self, row: usize, result: Result<PointOfInterest, DropReason>) {
        self.rows_read += 1;
        match result {
            Ok(point) => self.points.push(point),
            Err(reason) => {
                self.dropped += 1;
                debug!(row, %reason, "Dropped point row");
            }
        }
    }

    pub(crate) fn log_summary(&self) {
        info!(
            rows = self.rows_read,
            kept = self.points.len(),
            dropped = self.dropped,
            "Normalized point source"
        );
    }
}
