//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

const CANDIDATES: [&str; 3] = [
    "trailside.toml",
    ".trailside.toml",
    ".config/trailside.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations in
    /// the working directory are searched and defaults are used when none
    /// exists. The loaded schema is validated either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Path::new("."))
    }

    /// Like [`Config::load`] but searches relative to `dir`
    pub fn load_from(path: Option<&Path>, dir: &Path) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(dir),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => {
                debug!("No configuration file found, using defaults");
                ConfigSchema::default()
            }
        };
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    debug!(path = %path.display(), "Loading configuration");
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::from(e).with_context(format!("In {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.filter.radius_m, 40.0);
    }

    #[test]
    fn test_no_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(None, dir.path()).unwrap();
        assert!(config.path.is_none());
        assert_eq!(config.schema.route.stride, 60);
    }

    #[test]
    fn test_discovers_standard_location() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".config")).unwrap();
        fs::write(
            dir.path().join(".config/trailside.toml"),
            "[filter]\nradius_m = 75.5\n",
        )
        .unwrap();

        let config = Config::load_from(None, dir.path()).unwrap();
        assert_eq!(config.schema.filter.radius_m, 75.5);
        assert!(config.path.unwrap().ends_with(".config/trailside.toml"));
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/no/such/trailside.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailside.toml");
        fs::write(&path, "[filter\nradius_m = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailside.toml");
        fs::write(&path, "[route]\nstride = 0\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }
}
