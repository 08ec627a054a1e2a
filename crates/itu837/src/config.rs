//! Configuration for the rain statistics service.

use std::collections::BTreeMap;
use std::path::Path;

use rain_grid::GridConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::profile::VersionProfile;
use crate::version::ModelVersion;

/// Configuration for [`RainService`](crate::RainService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Dataset location and interpolation settings.
    pub grid: GridConfig,

    /// Version selected at startup (1-6).
    pub initial_version: u32,

    /// Memoize query results.
    pub cache_enabled: bool,

    /// Dataset profiles for versions without a built-in one, keyed by
    /// version number.
    pub profiles: BTreeMap<u32, VersionProfile>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            initial_version: ModelVersion::CURRENT.number(),
            cache_enabled: true,
            profiles: BTreeMap::new(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            grid: GridConfig::from_env(),
            ..Self::default()
        };

        if let Ok(val) = std::env::var("ITU837_VERSION") {
            if let Ok(version) = val.trim().parse() {
                config.initial_version = version;
            }
        }

        if let Ok(val) = std::env::var("ITU837_QUERY_CACHE") {
            config.cache_enabled = matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        config
    }

    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ModelError::Config(e.to_string()))
    }

    /// Read configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.grid.validate()?;

        if ModelVersion::try_from(self.initial_version).is_err() {
            return Err(format!(
                "initial_version must be 1-6, got {}",
                self.initial_version
            ));
        }

        if let Some(bad) = self.profiles.keys().find(|n| ModelVersion::try_from(**n).is_err()) {
            return Err(format!("profile for unknown version {bad}"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.initial_version, 6);
        assert!(config.cache_enabled);
        assert!(config.profiles.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServiceConfig::default();
        config.initial_version = 7;
        assert!(config.validate().is_err());

        config = ServiceConfig::default();
        config.grid.parallel_threshold = 0;
        assert!(config.validate().is_err());

        config = ServiceConfig::default();
        config.profiles.insert(9, VersionProfile::esarain());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config = ServiceConfig::from_json(
            r#"{"initial_version": 3, "grid": {"dataset_dir": "/srv/itur"}}"#,
        )
        .unwrap();

        assert_eq!(config.initial_version, 3);
        assert!(config.cache_enabled);
        assert_eq!(config.grid.dataset_dir, Path::new("/srv/itur"));
        assert_eq!(config.grid.file_extension, "txt");
    }

    #[test]
    fn test_json_with_profile() {
        let json = r#"{
            "profiles": {
                "5": {
                    "pr6":  {"name": "Pr6",  "lat": "v4/LAT", "lon": "v4/LON", "values": "v4/PR6"},
                    "mt":   {"name": "Mt",   "lat": "v4/LAT", "lon": "v4/LON", "values": "v4/MT"},
                    "beta": {"name": "Beta", "lat": "v4/LAT", "lon": "v4/LON", "values": "v4/BETA"}
                }
            }
        }"#;

        let config = ServiceConfig::from_json(json).unwrap();
        assert_eq!(config.profiles[&5].beta.values.as_str(), "v4/BETA");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            ServiceConfig::from_json("{\"initial_version\": \"six\"}"),
            Err(ModelError::Config(_))
        ));
    }
}
