//! Dataset loading from static resources.
//!
//! Datasets are plain text: one row per line, numbers separated by
//! whitespace or commas. Blank lines and lines starting with `#` are
//! skipped. Every resource parses into a [`Dataset::Matrix`] that keeps the
//! row layout of the file, so a single-row or single-column axis file stays
//! a 1xN or Nx1 matrix here. Axes are flattened to 1D by
//! [`Dataset::into_axis`] once the value grid's dimensions are known.
//!
//! Loaders do not cache. Each `load` call reads the resource again, so
//! callers that need a dataset more than once hold on to what they built
//! from it (see [`crate::field::LazyField`]).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use ndarray::Array2;
use tracing::{debug, info};

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::types::{Dataset, DatasetId};

/// A read-only store of numeric datasets.
pub trait DatasetSource: Send + Sync {
    /// Load the dataset with the given identifier.
    ///
    /// Fails with [`GridError::DataUnavailable`] if the identifier has no
    /// backing resource or the resource cannot be parsed.
    fn load(&self, id: &DatasetId) -> Result<Dataset>;

    /// Check whether a dataset exists without reading it.
    fn contains(&self, id: &DatasetId) -> bool;
}

/// Parse the text form of a dataset.
pub fn parse_dataset(id: &DatasetId, text: &str) -> Result<Dataset> {
    let mut values = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let before = values.len();
        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let value: f64 = token.parse().map_err(|_| {
                GridError::data_unavailable(
                    id.as_str(),
                    format!("line {}: invalid number '{}'", line_no + 1, token),
                )
            })?;
            values.push(value);
        }

        let width = values.len() - before;
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(GridError::data_unavailable(
                    id.as_str(),
                    format!(
                        "line {}: expected {} columns, found {}",
                        line_no + 1,
                        expected,
                        width
                    ),
                ));
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = match cols {
        Some(c) if c > 0 => c,
        _ => return Err(GridError::data_unavailable(id.as_str(), "resource is empty")),
    };

    let matrix = Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| GridError::data_unavailable(id.as_str(), e.to_string()))?;

    Ok(Dataset::Matrix(matrix))
}

/// Loads datasets from text files under a root directory.
///
/// The identifier `837/ESARAIN_PR6_v5` resolves to
/// `<root>/837/ESARAIN_PR6_v5.<ext>`.
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    root: PathBuf,
    extension: String,
}

impl FileDatasetSource {
    /// Create a source rooted at `root` reading `.txt` files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "txt".to_string(),
        }
    }

    /// Create a source from a grid configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            root: config.dataset_dir.clone(),
            extension: config.file_extension.clone(),
        }
    }

    /// Root directory of this source.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a dataset.
    pub fn path_for(&self, id: &DatasetId) -> PathBuf {
        self.root.join(format!("{}.{}", id.as_str(), self.extension))
    }
}

impl DatasetSource for FileDatasetSource {
    fn load(&self, id: &DatasetId) -> Result<Dataset> {
        let path = self.path_for(id);
        let text = std::fs::read_to_string(&path).map_err(|e| {
            GridError::data_unavailable(id.as_str(), format!("{}: {}", path.display(), e))
        })?;

        let dataset = parse_dataset(id, &text)?;
        let (rows, cols) = dataset.shape();
        info!(dataset = %id, path = %path.display(), rows, cols, "Loaded dataset");
        Ok(dataset)
    }

    fn contains(&self, id: &DatasetId) -> bool {
        self.path_for(id).is_file()
    }
}

/// Holds datasets in memory.
///
/// Useful for embedding data in a binary or for tests.
#[derive(Debug, Default)]
pub struct MemoryDatasetSource {
    datasets: RwLock<HashMap<DatasetId, Dataset>>,
}

impl MemoryDatasetSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a dataset.
    pub fn insert(&self, id: impl Into<DatasetId>, dataset: Dataset) {
        let id = id.into();
        debug!(dataset = %id, "Registered in-memory dataset");
        if let Ok(mut datasets) = self.datasets.write() {
            datasets.insert(id, dataset);
        }
    }

    /// Builder-style variant of [`MemoryDatasetSource::insert`].
    pub fn with(self, id: impl Into<DatasetId>, dataset: Dataset) -> Self {
        self.insert(id, dataset);
        self
    }

    /// Number of registered datasets.
    pub fn len(&self) -> usize {
        self.datasets.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Check if no datasets are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DatasetSource for MemoryDatasetSource {
    fn load(&self, id: &DatasetId) -> Result<Dataset> {
        let datasets = self
            .datasets
            .read()
            .map_err(|_| GridError::data_unavailable(id.as_str(), "dataset store poisoned"))?;

        datasets
            .get(id)
            .cloned()
            .ok_or_else(|| GridError::data_unavailable(id.as_str(), "no such dataset"))
    }

    fn contains(&self, id: &DatasetId) -> bool {
        self.datasets
            .read()
            .map(|d| d.contains_key(id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AxisKind;
    use ndarray::array;

    fn id(s: &str) -> DatasetId {
        DatasetId::from(s)
    }

    #[test]
    fn test_parse_whitespace_matrix() {
        let text = "0 10\n10  20\n";
        let dataset = parse_dataset(&id("v"), text).unwrap();
        assert_eq!(dataset, Dataset::Matrix(array![[0.0, 10.0], [10.0, 20.0]]));
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# header\n\n1.5, 2.5\n\n3.5,4.5\n";
        let dataset = parse_dataset(&id("v"), text).unwrap();
        assert_eq!(dataset.shape(), (2, 2));
    }

    #[test]
    fn test_parse_scientific_notation() {
        let dataset = parse_dataset(&id("v"), "1e-3 -2.5E2").unwrap();
        assert_eq!(dataset, Dataset::Matrix(array![[0.001, -250.0]]));
    }

    #[test]
    fn test_parse_axis_file_keeps_layout() {
        let column = parse_dataset(&id("LAT"), "0\n10\n20\n").unwrap();
        assert_eq!(column.shape(), (3, 1));
        assert!(column.is_one_dimensional());
        assert_eq!(
            column.into_axis(AxisKind::Latitude, (3, 4)).unwrap(),
            array![0.0, 10.0, 20.0]
        );

        let row = parse_dataset(&id("LON"), "0, 90, 180, 270\n").unwrap();
        assert_eq!(row.shape(), (1, 4));
        assert_eq!(
            row.into_axis(AxisKind::Longitude, (3, 4)).unwrap(),
            array![0.0, 90.0, 180.0, 270.0]
        );
    }

    #[test]
    fn test_parse_ragged_rows() {
        let err = parse_dataset(&id("ragged"), "1 2 3\n4 5\n").unwrap_err();
        match err {
            GridError::DataUnavailable { dataset, reason } => {
                assert_eq!(dataset, "ragged");
                assert!(reason.contains("line 2"), "{}", reason);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_bad_token() {
        let err = parse_dataset(&id("bad"), "1 two 3").unwrap_err();
        assert!(matches!(err, GridError::DataUnavailable { .. }));
    }

    #[test]
    fn test_parse_empty() {
        let err = parse_dataset(&id("empty"), "# nothing here\n\n").unwrap_err();
        assert!(matches!(err, GridError::DataUnavailable { .. }));
    }

    #[test]
    fn test_memory_source() {
        let source = MemoryDatasetSource::new().with("lat", Dataset::Vector(array![0.0, 10.0]));

        assert!(source.contains(&id("lat")));
        assert!(!source.contains(&id("lon")));
        assert_eq!(source.len(), 1);
        assert_eq!(
            source.load(&id("lat")).unwrap(),
            Dataset::Vector(array![0.0, 10.0])
        );
        assert!(matches!(
            source.load(&id("lon")),
            Err(GridError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_file_source_path() {
        let source = FileDatasetSource::new("/data");
        assert_eq!(
            source.path_for(&id("837/ESARAIN_MT_v5")),
            PathBuf::from("/data/837/ESARAIN_MT_v5.txt")
        );
    }
}
