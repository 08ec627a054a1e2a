//! Configuration for dataset loading and interpolation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the grid layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Root directory holding the static dataset files.
    pub dataset_dir: PathBuf,

    /// File extension of dataset files (without the dot).
    pub file_extension: String,

    /// Batches with at least this many points are interpolated in parallel.
    pub parallel_threshold: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("data"),
            file_extension: "txt".to_string(),
            parallel_threshold: 4096,
        }
    }
}

impl GridConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RAIN_DATASET_DIR") {
            config.dataset_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("RAIN_DATASET_EXT") {
            config.file_extension = val.trim_start_matches('.').to_string();
        }

        if let Ok(val) = std::env::var("RAIN_PARALLEL_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                config.parallel_threshold = threshold;
            }
        }

        config
    }

    /// Set the dataset directory.
    pub fn with_dataset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dataset_dir = dir.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.dataset_dir.as_os_str().is_empty() {
            return Err("dataset_dir must not be empty".to_string());
        }

        if self.file_extension.is_empty() {
            return Err("file_extension must not be empty".to_string());
        }

        if self.parallel_threshold == 0 {
            return Err("parallel_threshold must be > 0".to_string());
        }

        Ok(())
    }
}
