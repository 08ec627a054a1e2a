//! Public query facade.
//!
//! `RainService` is the entry point for callers: it normalizes input shapes,
//! wraps longitudes, evaluates the active model version, attaches units and
//! memoizes results.
//!
//! # Example
//!
//! ```rust,ignore
//! let service = RainService::from_config(ServiceConfig::from_env())?;
//!
//! let p0 = service.rain_percentage_probability(51.5, -0.1)?;
//! let r001 = service.rainfall_rate(vec![51.5, 40.4], vec![-0.1, -3.7], 0.01)?;
//! println!("{p0}, {r001}");
//! ```

use std::sync::Arc;

use rain_grid::FileDatasetSource;
use tracing::{debug, info};

use crate::cache::{CacheStats, QueryCache, QueryKey, QueryOp};
use crate::config::ServiceConfig;
use crate::error::{ModelError, Result};
use crate::formula::validate_percentage;
use crate::model::RainStatistics;
use crate::profile::VersionProfile;
use crate::registry::VersionRegistry;
use crate::units::{Quantity, Unit};
use crate::values::{PreparedQuery, Values};
use crate::version::{ModelVersion, VersionInfo};

/// Rain statistics service over an injectable version registry.
#[derive(Debug)]
pub struct RainService {
    registry: Arc<VersionRegistry>,
    cache: Option<QueryCache>,
}

impl RainService {
    /// Create a service over `registry`, with memoization enabled.
    pub fn new(registry: Arc<VersionRegistry>) -> Self {
        Self {
            registry,
            cache: Some(QueryCache::new()),
        }
    }

    /// Create a service without result memoization.
    pub fn uncached(registry: Arc<VersionRegistry>) -> Self {
        Self {
            registry,
            cache: None,
        }
    }

    /// Build a service reading datasets from the configured directory.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        config.validate().map_err(ModelError::Config)?;

        let version = ModelVersion::try_from(config.initial_version)?;
        let source = Arc::new(FileDatasetSource::from_config(&config.grid));
        let registry = VersionRegistry::with_version(
            source,
            version,
            config.grid.parallel_threshold,
        );

        for (number, profile) in config.profiles {
            registry.register_profile(ModelVersion::try_from(number)?, profile);
        }

        info!(
            dataset_dir = %config.grid.dataset_dir.display(),
            version = %version,
            cache_enabled = config.cache_enabled,
            "Rain statistics service initialized"
        );

        let registry = Arc::new(registry);
        Ok(if config.cache_enabled {
            Self::new(registry)
        } else {
            Self::uncached(registry)
        })
    }

    /// Percentage probability of rain in an average year (P0), in `%`.
    pub fn rain_percentage_probability(
        &self,
        lat: impl Into<Values>,
        lon: impl Into<Values>,
    ) -> Result<Quantity> {
        let query = PreparedQuery::new(&lat.into(), &lon.into())?;
        let model = self.registry.active();

        let values = self.memoize(model.version(), QueryOp::Probability, &query, || {
            let flat = model.rain_percentage_probability(&query.lats, &query.lons)?;
            query.shape.reshape(flat)
        })?;

        Ok(Quantity::new(values, Unit::Percent))
    }

    /// Rainfall rate exceeded for `p`% of an average year, in `mm/h`.
    pub fn rainfall_rate(
        &self,
        lat: impl Into<Values>,
        lon: impl Into<Values>,
        p: f64,
    ) -> Result<Quantity> {
        validate_percentage(p)?;
        let query = PreparedQuery::new(&lat.into(), &lon.into())?;
        let model = self.registry.active();

        let values = self.memoize(model.version(), QueryOp::rate(p), &query, || {
            let flat = model.rainfall_rate(&query.lats, &query.lons, p)?;
            query.shape.reshape(flat)
        })?;

        Ok(Quantity::new(values, Unit::MillimetresPerHour))
    }

    /// Select the active version and drop memoized results.
    pub fn change_version(&self, number: u32) -> Result<()> {
        self.registry.change_version(number)?;
        self.clear_cache();
        Ok(())
    }

    /// Number of the active version.
    pub fn get_version(&self) -> u32 {
        self.registry.get_version()
    }

    /// Metadata of the active version.
    pub fn version_info(&self) -> VersionInfo {
        self.registry.active_version().info()
    }

    /// Register a dataset profile and drop memoized results.
    pub fn register_profile(&self, version: ModelVersion, profile: VersionProfile) {
        self.registry.register_profile(version, profile);
        self.clear_cache();
    }

    pub fn registry(&self) -> &Arc<VersionRegistry> {
        &self.registry
    }

    /// Memoization statistics, `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(QueryCache::stats)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn memoize(
        &self,
        version: ModelVersion,
        op: QueryOp,
        query: &PreparedQuery,
        compute: impl FnOnce() -> Result<Values>,
    ) -> Result<Values> {
        match &self.cache {
            Some(cache) => {
                let key = QueryKey::new(version, op, query);
                cache.get_or_try_insert(key, compute)
            }
            None => {
                debug!(points = query.len(), "Evaluating uncached query");
                compute()
            }
        }
    }
}
