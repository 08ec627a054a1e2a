//! Path utilities and temporary dataset directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::Array2;

use crate::generators::format_dataset;

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Creates a temporary directory with a specific prefix.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// A temporary directory laid out like a dataset root.
///
/// Dataset `837/ESARAIN_MT_v5` is written to `<root>/837/ESARAIN_MT_v5.txt`.
pub struct DatasetDir {
    dir: tempfile::TempDir,
}

impl DatasetDir {
    /// Create an empty dataset directory.
    pub fn new() -> Self {
        Self {
            dir: temp_test_dir_with_prefix("rain_datasets_"),
        }
    }

    /// Root path to hand to a file-backed dataset source.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path a dataset id resolves to.
    pub fn file_for(&self, id: &str) -> PathBuf {
        self.dir.path().join(format!("{}.txt", id))
    }

    /// Write a matrix dataset.
    pub fn write(&self, id: &str, values: &Array2<f64>) -> Result<PathBuf> {
        self.write_raw(id, &format_dataset(values))
    }

    /// Write raw text as a dataset (for malformed-input tests).
    pub fn write_raw(&self, id: &str, text: &str) -> Result<PathBuf> {
        let path = self.file_for(id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

impl Default for DatasetDir {
    fn default() -> Self {
        Self::new()
    }
}
