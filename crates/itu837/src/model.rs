//! Model evaluation per recommendation version.
//!
//! Every version exposes the same two operations through [`RainStatistics`].
//! [`RainModel`] is the tagged union over versions; each variant owns (or
//! lacks) a [`FieldModel`] holding the three lazily built fields of its
//! profile.

use std::sync::Arc;

use rain_grid::interpolation::DEFAULT_PARALLEL_THRESHOLD;
use rain_grid::{DatasetSource, LazyField};
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::formula::{self, validate_percentage};
use crate::profile::{FormulaConstants, VersionProfile};
use crate::version::ModelVersion;

/// The two-operation contract of a P.837 model version.
///
/// Inputs are flat, equally long latitude and longitude slices with
/// longitudes already in [0, 360). Outputs have the same length.
pub trait RainStatistics {
    /// Version this model implements.
    fn version(&self) -> ModelVersion;

    /// Percentage probability of rain in an average year, P0.
    fn rain_percentage_probability(&self, lats: &[f64], lons: &[f64]) -> Result<Vec<f64>>;

    /// Rainfall rate (mm/h) exceeded for `p`% of an average year.
    fn rainfall_rate(&self, lats: &[f64], lons: &[f64], p: f64) -> Result<Vec<f64>>;
}

/// Interpolated Pr6, Mt and Beta at a set of points.
struct FieldSamples {
    pr6: Vec<f64>,
    mt: Vec<f64>,
    beta: Vec<f64>,
}

/// A model evaluated from three gridded fields.
pub struct FieldModel {
    version: ModelVersion,
    constants: FormulaConstants,
    source: Arc<dyn DatasetSource>,
    pr6: LazyField,
    mt: LazyField,
    beta: LazyField,
}

impl FieldModel {
    /// Create a model; no dataset is read until the first query.
    pub fn new(
        version: ModelVersion,
        profile: VersionProfile,
        source: Arc<dyn DatasetSource>,
        parallel_threshold: usize,
    ) -> Self {
        Self {
            version,
            constants: profile.constants,
            source,
            pr6: LazyField::new(profile.pr6).with_parallel_threshold(parallel_threshold),
            mt: LazyField::new(profile.mt).with_parallel_threshold(parallel_threshold),
            beta: LazyField::new(profile.beta).with_parallel_threshold(parallel_threshold),
        }
    }

    /// Formula constants of this model.
    pub fn constants(&self) -> &FormulaConstants {
        &self.constants
    }

    /// Whether all three fields have been built.
    pub fn is_loaded(&self) -> bool {
        self.pr6.is_loaded() && self.mt.is_loaded() && self.beta.is_loaded()
    }

    fn sample(&self, lats: &[f64], lons: &[f64]) -> Result<FieldSamples> {
        if lats.len() != lons.len() {
            return Err(ModelError::shape_mismatch(
                format!("({},)", lats.len()),
                format!("({},)", lons.len()),
            ));
        }

        let source = self.source.as_ref();
        let pr6 = self.pr6.get_or_load(source)?.interpolate_pairs(lats, lons)?;
        let mt = self.mt.get_or_load(source)?.interpolate_pairs(lats, lons)?;
        let beta = self.beta.get_or_load(source)?.interpolate_pairs(lats, lons)?;

        Ok(FieldSamples { pr6, mt, beta })
    }
}

impl RainStatistics for FieldModel {
    fn version(&self) -> ModelVersion {
        self.version
    }

    fn rain_percentage_probability(&self, lats: &[f64], lons: &[f64]) -> Result<Vec<f64>> {
        let s = self.sample(lats, lons)?;
        Ok(s.pr6
            .iter()
            .zip(&s.mt)
            .zip(&s.beta)
            .map(|((&pr6, &mt), &beta)| formula::probability_of_rain(pr6, mt, beta, &self.constants))
            .collect())
    }

    fn rainfall_rate(&self, lats: &[f64], lons: &[f64], p: f64) -> Result<Vec<f64>> {
        validate_percentage(p)?;
        let s = self.sample(lats, lons)?;
        Ok(s.pr6
            .iter()
            .zip(&s.mt)
            .zip(&s.beta)
            .map(|((&pr6, &mt), &beta)| formula::rainfall_rate(pr6, mt, beta, p, &self.constants))
            .collect())
    }
}

impl std::fmt::Debug for FieldModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldModel")
            .field("version", &self.version)
            .field("constants", &self.constants)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// A P.837 model, one variant per recommendation version.
///
/// Superseded versions carry a [`FieldModel`] only when a profile has been
/// registered for them; without one every query fails with
/// `DataUnavailable`.
#[derive(Debug)]
pub enum RainModel {
    V1(Option<FieldModel>),
    V2(Option<FieldModel>),
    V3(Option<FieldModel>),
    V4(Option<FieldModel>),
    V5(Option<FieldModel>),
    V6(FieldModel),
}

impl RainModel {
    /// Build the model for `version`.
    ///
    /// `profile` overrides the ESARAIN profile P.837-6 falls back to.
    /// Superseded versions have no fallback.
    pub fn new(
        version: ModelVersion,
        profile: Option<VersionProfile>,
        source: Arc<dyn DatasetSource>,
        parallel_threshold: usize,
    ) -> Self {
        let fields =
            profile.map(|p| FieldModel::new(version, p, source.clone(), parallel_threshold));

        let model = match version {
            ModelVersion::V1 => Self::V1(fields),
            ModelVersion::V2 => Self::V2(fields),
            ModelVersion::V3 => Self::V3(fields),
            ModelVersion::V4 => Self::V4(fields),
            ModelVersion::V5 => Self::V5(fields),
            ModelVersion::V6 => Self::V6(fields.unwrap_or_else(|| {
                FieldModel::new(version, VersionProfile::esarain(), source, parallel_threshold)
            })),
        };

        debug!(
            %version,
            has_profile = model.field_model().is_some(),
            "Created rain model"
        );
        model
    }

    /// Build the model with the built-in profile and default settings.
    pub fn builtin(version: ModelVersion, source: Arc<dyn DatasetSource>) -> Self {
        Self::new(version, None, source, DEFAULT_PARALLEL_THRESHOLD)
    }

    /// The field model behind this version, if it has one.
    pub fn field_model(&self) -> Option<&FieldModel> {
        match self {
            Self::V1(m) | Self::V2(m) | Self::V3(m) | Self::V4(m) | Self::V5(m) => m.as_ref(),
            Self::V6(m) => Some(m),
        }
    }

    fn require_fields(&self) -> Result<&FieldModel> {
        self.field_model().ok_or_else(|| {
            ModelError::data_unavailable(
                self.version().to_string(),
                "no dataset profile registered for this version",
            )
        })
    }
}

impl RainStatistics for RainModel {
    fn version(&self) -> ModelVersion {
        match self {
            Self::V1(_) => ModelVersion::V1,
            Self::V2(_) => ModelVersion::V2,
            Self::V3(_) => ModelVersion::V3,
            Self::V4(_) => ModelVersion::V4,
            Self::V5(_) => ModelVersion::V5,
            Self::V6(_) => ModelVersion::V6,
        }
    }

    fn rain_percentage_probability(&self, lats: &[f64], lons: &[f64]) -> Result<Vec<f64>> {
        self.require_fields()?.rain_percentage_probability(lats, lons)
    }

    fn rainfall_rate(&self, lats: &[f64], lons: &[f64], p: f64) -> Result<Vec<f64>> {
        validate_percentage(p)?;
        self.require_fields()?.rainfall_rate(lats, lons, p)
    }
}
