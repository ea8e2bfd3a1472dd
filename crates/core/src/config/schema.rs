//! Configuration schema definitions

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trailside_geo::TailPolicy;
use trailside_points::ColumnMapping;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Route file and down-sampling
    #[serde(default)]
    pub route: RouteConfig,

    /// Point source and column layout
    #[serde(default)]
    pub points: PointsConfig,

    /// Filter radius and display limits
    #[serde(default)]
    pub filter: FilterConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.filter.radius_m.is_finite() || self.filter.radius_m <= 0.0 {
            return Err(Error::config_validation(format!(
                "filter.radius_m must be a positive number of meters, got {}",
                self.filter.radius_m
            )));
        }
        if self.route.stride == 0 {
            return Err(Error::config_validation("route.stride must be at least 1"));
        }
        self.points.column_mapping()?;
        Ok(())
    }
}

/// Route configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// GPX file to load when `--route` is not given
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Keep every Nth track vertex
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Append the final vertex when striding skips it
    #[serde(default)]
    pub keep_last: bool,
}

impl RouteConfig {
    /// Down-sampling tail policy
    pub fn tail_policy(&self) -> TailPolicy {
        if self.keep_last {
            TailPolicy::Keep
        } else {
            TailPolicy::Drop
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            path: None,
            stride: default_stride(),
            keep_last: false,
        }
    }
}

fn default_stride() -> usize {
    60
}

/// Point source configuration
///
/// A preset picks a built-in column layout; the individual column fields
/// override it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PointsConfig {
    /// CSV file to load when `--points` is not given
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Built-in column layout, e.g. `seoul-restrooms`
    #[serde(default)]
    pub preset: Option<String>,

    /// Label column override
    #[serde(default)]
    pub label_column: Option<String>,

    /// Latitude column override
    #[serde(default)]
    pub latitude_column: Option<String>,

    /// Longitude column override
    #[serde(default)]
    pub longitude_column: Option<String>,

    /// Attribute columns override
    #[serde(default)]
    pub attributes: Option<Vec<String>>,

    /// Source text encoding override, e.g. `utf-8` or `euc-kr`
    #[serde(default)]
    pub encoding: Option<String>,
}

impl PointsConfig {
    /// Resolve the effective column mapping
    pub fn column_mapping(&self) -> Result<ColumnMapping> {
        let mut mapping = match self.preset.as_deref() {
            Some(name) => ColumnMapping::preset(name).ok_or_else(|| {
                Error::new(
                    ErrorCode::InvalidConfigValue,
                    format!("Unknown point source preset '{}'", name),
                )
                .with_suggestion(format!(
                    "Use one of: default, {}",
                    ColumnMapping::SEOUL_OPEN_RESTROOMS
                ))
            })?,
            None => ColumnMapping::default(),
        };

        if let Some(label) = &self.label_column {
            mapping.label = label.clone();
        }
        if let Some(latitude) = &self.latitude_column {
            mapping.latitude = latitude.clone();
        }
        if let Some(longitude) = &self.longitude_column {
            mapping.longitude = longitude.clone();
        }
        if let Some(attributes) = &self.attributes {
            mapping.attributes = attributes.clone();
        }
        if let Some(encoding) = &self.encoding {
            mapping.encoding = encoding.clone();
        }

        mapping.decoder().map_err(|e| {
            Error::new(ErrorCode::InvalidConfigValue, e.to_string())
                .with_suggestion("Set points.encoding to a label such as utf-8 or euc-kr")
        })?;
        Ok(mapping)
    }
}

/// Filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Inclusion radius in meters
    #[serde(default = "default_radius_m")]
    pub radius_m: f64,

    /// Matches shown in the terminal and exported as markers
    #[serde(default = "default_max_markers")]
    pub max_markers: usize,

    /// Filter in parallel chunks
    #[serde(default)]
    pub parallel: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            max_markers: default_max_markers(),
            parallel: false,
        }
    }
}

fn default_radius_m() -> f64 {
    40.0
}

fn default_max_markers() -> usize {
    50
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per log line
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
