//! Session configuration

use std::path::Path;

use arplace_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::plane::PlaneAlignment;

/// Which surfaces plane detection reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneDetection {
    None,
    Horizontal,
    Vertical,
    All,
}

impl PlaneDetection {
    /// Check whether planes with `alignment` are reported
    pub fn accepts(self, alignment: PlaneAlignment) -> bool {
        match self {
            Self::None => false,
            Self::Horizontal => alignment == PlaneAlignment::Horizontal,
            Self::Vertical => alignment == PlaneAlignment::Vertical,
            Self::All => true,
        }
    }
}

/// World tracking configuration applied when a session runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfiguration {
    pub plane_detection: PlaneDetection,
    /// Log frame statistics on every update
    pub shows_statistics: bool,
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            plane_detection: PlaneDetection::Horizontal,
            shows_statistics: true,
        }
    }
}

impl SessionConfiguration {
    /// Parse a configuration from TOML; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Read a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_detects_horizontal_planes() {
        let config = SessionConfiguration::default();
        assert_eq!(config.plane_detection, PlaneDetection::Horizontal);
        assert!(config.shows_statistics);
    }

    #[test]
    fn test_plane_detection_filter() {
        assert!(PlaneDetection::Horizontal.accepts(PlaneAlignment::Horizontal));
        assert!(!PlaneDetection::Horizontal.accepts(PlaneAlignment::Vertical));
        assert!(PlaneDetection::Vertical.accepts(PlaneAlignment::Vertical));
        assert!(PlaneDetection::All.accepts(PlaneAlignment::Vertical));
        assert!(!PlaneDetection::None.accepts(PlaneAlignment::Horizontal));
    }

    #[test]
    fn test_from_toml_str() {
        let config = SessionConfiguration::from_toml_str(
            r#"
            plane_detection = "all"
            shows_statistics = false
            "#,
        )
        .unwrap();
        assert_eq!(config.plane_detection, PlaneDetection::All);
        assert!(!config.shows_statistics);

        let partial = SessionConfiguration::from_toml_str("shows_statistics = false").unwrap();
        assert_eq!(partial.plane_detection, PlaneDetection::Horizontal);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = SessionConfiguration::from_toml_str("plane_detection = \"diagonal\"");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = SessionConfiguration::load("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
