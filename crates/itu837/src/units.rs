//! Physical units attached to query results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::values::Values;

/// Unit of a rain statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Percentage of an average year.
    #[serde(rename = "%")]
    Percent,
    /// Rainfall rate.
    #[serde(rename = "mm/h")]
    MillimetresPerHour,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::MillimetresPerHour => "mm/h",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Values tagged with their unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    values: Values,
    unit: Unit,
}

impl Quantity {
    pub fn new(values: Values, unit: Unit) -> Self {
        Self { values, unit }
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The value of a scalar result.
    pub fn as_scalar(&self) -> Option<f64> {
        self.values.as_scalar()
    }

    /// Drop the unit.
    pub fn into_values(self) -> Values {
        self.values
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.values {
            Values::Scalar(x) => write!(f, "{x} {}", self.unit),
            Values::Sequence(v) => write!(f, "{v:?} {}", self.unit),
            Values::Array(a) => write!(f, "{a} {}", self.unit),
        }
    }
}
