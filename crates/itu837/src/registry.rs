//! Process-wide selection of the active model version.
//!
//! The registry owns one [`RainModel`] per version, built on first use, and
//! a pointer to the active one. Switching versions swaps that pointer; the
//! previous model and its loaded fields stay cached for a later switch back.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rain_grid::interpolation::DEFAULT_PARALLEL_THRESHOLD;
use rain_grid::DatasetSource;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{RainModel, RainStatistics};
use crate::profile::VersionProfile;
use crate::version::ModelVersion;

/// Registry of model versions with one active selection.
pub struct VersionRegistry {
    source: Arc<dyn DatasetSource>,
    parallel_threshold: usize,
    profiles: RwLock<HashMap<ModelVersion, VersionProfile>>,
    models: RwLock<HashMap<ModelVersion, Arc<RainModel>>>,
    active: RwLock<Arc<RainModel>>,
}

impl VersionRegistry {
    /// Create a registry with [`ModelVersion::CURRENT`] active.
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self::with_version(source, ModelVersion::CURRENT, DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Create a registry with `version` active.
    pub fn with_version(
        source: Arc<dyn DatasetSource>,
        version: ModelVersion,
        parallel_threshold: usize,
    ) -> Self {
        let initial = Arc::new(RainModel::new(
            version,
            None,
            source.clone(),
            parallel_threshold,
        ));

        let mut models = HashMap::new();
        models.insert(version, initial.clone());

        Self {
            source,
            parallel_threshold,
            profiles: RwLock::new(HashMap::new()),
            models: RwLock::new(models),
            active: RwLock::new(initial),
        }
    }

    /// Select the active version by number.
    ///
    /// An unknown number fails with `InvalidVersion` and leaves the current
    /// selection in place.
    pub fn change_version(&self, number: u32) -> Result<()> {
        let version = ModelVersion::try_from(number)?;
        let model = self.model_for(version);

        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        let previous = active.version();
        *active = model;

        info!(from = %previous, to = %version, "Changed P.837 model version");
        Ok(())
    }

    /// Number of the active version.
    pub fn get_version(&self) -> u32 {
        self.active_version().number()
    }

    /// The active version.
    pub fn active_version(&self) -> ModelVersion {
        self.active().version()
    }

    /// Snapshot of the active model.
    ///
    /// Callers evaluating several steps of one query should take a single
    /// snapshot so a concurrent switch cannot mix versions.
    pub fn active(&self) -> Arc<RainModel> {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Register (or replace) the dataset profile of a version.
    ///
    /// A model already built for that version is discarded, so the next
    /// selection picks up the new datasets. The active selection is rebuilt
    /// in place when it is the affected version.
    pub fn register_profile(&self, version: ModelVersion, profile: VersionProfile) {
        self.profiles
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(version, profile);
        self.models
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&version);

        debug!(%version, "Registered dataset profile");

        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        if active.version() == version {
            *active = self.model_for(version);
        }
    }

    /// Whether a model for `version` has been built.
    pub fn is_built(&self, version: ModelVersion) -> bool {
        self.models
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&version)
    }

    fn model_for(&self, version: ModelVersion) -> Arc<RainModel> {
        {
            let models = self.models.read().unwrap_or_else(|e| e.into_inner());
            if let Some(model) = models.get(&version) {
                return model.clone();
            }
        }

        let mut models = self.models.write().unwrap_or_else(|e| e.into_inner());
        if let Some(model) = models.get(&version) {
            return model.clone();
        }

        let profile = self
            .profiles
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&version)
            .cloned();
        let model = Arc::new(RainModel::new(
            version,
            profile,
            self.source.clone(),
            self.parallel_threshold,
        ));
        models.insert(version, model.clone());
        model
    }
}

impl std::fmt::Debug for VersionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionRegistry")
            .field("active", &self.active_version())
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}
