//! Dataset and constant profiles of model versions.
//!
//! A profile is pure configuration: which datasets hold the Pr6, Mt and Beta
//! fields, and the constants of the probability and rate formulas. Only
//! P.837-6 ships with a built-in profile (ESARAIN v5 data); profiles for
//! superseded versions can be registered at runtime.

use rain_grid::FieldSpec;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Constants of the P0 and Rp formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormulaConstants {
    /// Exponent factor in P0 = Pr6 (1 - exp(-k Ms / Pr6)).
    pub probability_exponent: f64,
    /// Coefficient `a` of the rate quadratic.
    pub a: f64,
    /// Divisor in b = (Mc + Ms) / (divisor P0).
    pub b_divisor: f64,
    /// Factor in c = factor b.
    pub c_factor: f64,
}

impl FormulaConstants {
    /// Constants of P.837-6.
    pub const P837_6: FormulaConstants = FormulaConstants {
        probability_exponent: 0.0079,
        a: 1.09,
        b_divisor: 21797.0,
        c_factor: 26.02,
    };
}

impl Default for FormulaConstants {
    fn default() -> Self {
        Self::P837_6
    }
}

/// Datasets and constants for one model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionProfile {
    pub pr6: FieldSpec,
    pub mt: FieldSpec,
    pub beta: FieldSpec,
    #[serde(default)]
    pub constants: FormulaConstants,
}

impl VersionProfile {
    /// ESARAIN v5 profile used by P.837-6.
    pub fn esarain() -> Self {
        const LAT: &str = "837/ESARAIN_LAT_v5";
        const LON: &str = "837/ESARAIN_LON_v5";

        Self {
            pr6: FieldSpec::new("Pr6", LAT, LON, "837/ESARAIN_PR6_v5"),
            mt: FieldSpec::new("Mt", LAT, LON, "837/ESARAIN_MT_v5"),
            beta: FieldSpec::new("Beta", LAT, LON, "837/ESARAIN_BETA_v5"),
            constants: FormulaConstants::P837_6,
        }
    }

    /// Parse a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ModelError::Config(e.to_string()))
    }
}
