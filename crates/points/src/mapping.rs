//! Source column to canonical field mapping.

use crate::{PointsError, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

/// Which source columns hold the label, coordinates and carried attributes,
/// and the text encoding the source is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Column holding the display label (address, name)
    pub label: String,
    /// Column holding latitude in decimal degrees
    pub latitude: String,
    /// Column holding longitude in decimal degrees
    pub longitude: String,
    /// Free-text columns copied into the point's attributes
    #[serde(default)]
    pub attributes: Vec<String>,
    /// WHATWG encoding label of the source bytes, e.g. `utf-8` or `euc-kr`
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            label: "label".to_string(),
            latitude: "lat".to_string(),
            longitude: "lon".to_string(),
            attributes: Vec::new(),
            encoding: default_encoding(),
        }
    }
}

impl ColumnMapping {
    /// Name of the Seoul open restroom preset.
    pub const SEOUL_OPEN_RESTROOMS: &'static str = "seoul-restrooms";

    /// Creates a mapping with no attribute columns.
    pub fn new(
        label: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            attributes: Vec::new(),
            encoding: default_encoding(),
        }
    }

    /// Replaces the attribute column list.
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the source encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Resolves the encoding label, failing on labels no decoder knows.
    pub fn decoder(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| PointsError::UnknownEncoding(self.encoding.clone()))
    }

    /// Layout of the Seoul open public restroom dataset.
    ///
    /// Road address as label, `y 좌표` as latitude, `x 좌표` as longitude,
    /// opening hours and accessible-restroom status as attributes. The
    /// published file is EUC-KR.
    pub fn seoul_open_restrooms() -> Self {
        Self::new("도로명주소", "y 좌표", "x 좌표")
            .with_attributes(["개방시간", "장애인화장실 현황"])
            .with_encoding("euc-kr")
    }

    /// Looks up a built-in mapping by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            Self::SEOUL_OPEN_RESTROOMS => Some(Self::seoul_open_restrooms()),
            _ => None,
        }
    }

    /// Label, latitude and longitude column names, in that order.
    pub fn required_columns(&self) -> [&str; 3] {
        [self.label.as_str(), self.latitude.as_str(), self.longitude.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let mapping = ColumnMapping::default();
        assert_eq!(mapping.required_columns(), ["label", "lat", "lon"]);
        assert!(mapping.attributes.is_empty());
        assert_eq!(mapping.decoder().unwrap(), encoding_rs::UTF_8);
    }

    #[test]
    fn test_encoding_labels() {
        let seoul = ColumnMapping::seoul_open_restrooms();
        assert_eq!(seoul.decoder().unwrap(), encoding_rs::EUC_KR);

        let windows_949 = ColumnMapping::default().with_encoding("windows-949");
        assert_eq!(windows_949.decoder().unwrap(), encoding_rs::EUC_KR);

        let err = ColumnMapping::default().with_encoding("klingon").decoder().unwrap_err();
        assert!(matches!(err, PointsError::UnknownEncoding(ref label) if label == "klingon"));
    }

    #[test]
    fn test_encoding_defaults_when_deserialized() {
        let mapping: ColumnMapping =
            serde_json::from_str(r#"{"label":"name","latitude":"y","longitude":"x"}"#).unwrap();
        assert_eq!(mapping.encoding, "utf-8");
    }

    #[test]
    fn test_presets() {
        let seoul = ColumnMapping::preset("seoul-restrooms").unwrap();
        assert_eq!(seoul.longitude, "x 좌표");
        assert_eq!(seoul.latitude, "y 좌표");
        assert_eq!(seoul.attributes.len(), 2);
        assert!(ColumnMapping::preset("nope").is_none());
    }
}
