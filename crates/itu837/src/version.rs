//! ITU-R P.837 recommendation versions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A version of ITU-R Recommendation P.837.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelVersion {
    /// P.837-1 (08/94), superseded.
    V1,
    /// P.837-2 (10/99), superseded.
    V2,
    /// P.837-3 (02/01), superseded.
    V3,
    /// P.837-4 (04/03), superseded.
    V4,
    /// P.837-5 (08/07), superseded.
    V5,
    /// P.837-6 (02/12), current.
    V6,
}

impl ModelVersion {
    /// All versions, oldest first.
    pub const ALL: [ModelVersion; 6] = [
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
    ];

    /// The version in force.
    pub const CURRENT: ModelVersion = Self::V6;

    /// Version number (1-6).
    pub fn number(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
            Self::V6 => 6,
        }
    }

    /// Zero-based position in [`ModelVersion::ALL`].
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// Publication metadata for this version.
    pub fn info(self) -> VersionInfo {
        let (year, month) = match self {
            Self::V1 => (1994, 8),
            Self::V2 => (1999, 10),
            Self::V3 => (2001, 2),
            Self::V4 => (2003, 4),
            Self::V5 => (2007, 8),
            Self::V6 => (2012, 2),
        };

        let status = if self == Self::CURRENT {
            VersionStatus::Current
        } else {
            VersionStatus::Superseded
        };

        let link = match self {
            Self::V6 => "https://www.itu.int/rec/R-REC-P.837-6-201202-I/en",
            _ => "https://www.itu.int/rec/R-REC-P.837/en",
        };

        VersionInfo {
            number: self.number(),
            title: format!("P.837-{}", self.number()),
            year,
            month,
            status,
            link: link.to_string(),
        }
    }
}

impl Default for ModelVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl TryFrom<u32> for ModelVersion {
    type Error = ModelError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            5 => Ok(Self::V5),
            6 => Ok(Self::V6),
            other => Err(ModelError::InvalidVersion(other)),
        }
    }
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P.837-{}", self.number())
    }
}

/// Whether a version is still in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Current,
    Superseded,
}

/// Publication metadata of a recommendation version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version number (1-6).
    pub number: u32,
    /// Short title, e.g. "P.837-6".
    pub title: String,
    /// Publication year.
    pub year: i32,
    /// Publication month (1-12).
    pub month: u32,
    /// Current or superseded.
    pub status: VersionStatus,
    /// Reference link.
    pub link: String,
}

impl VersionInfo {
    /// First day of the publication month.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Whether this version is the one in force.
    pub fn is_current(&self) -> bool {
        self.status == VersionStatus::Current
    }
}
