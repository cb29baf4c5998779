use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::config::LevelThresholds;

/// Discrete outbreak risk bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl RiskLevel {
    /// Classifies a composite score. Bounds are lower-inclusive, so a score
    /// sitting exactly on a threshold belongs to the higher level.
    pub fn from_score(score: f64, thresholds: &LevelThresholds) -> Self {
        if score < thresholds.yellow {
            RiskLevel::Green
        } else if score < thresholds.red {
            RiskLevel::Yellow
        } else {
            RiskLevel::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "green",
            RiskLevel::Yellow => "yellow",
            RiskLevel::Red => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown risk level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for RiskLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(RiskLevel::Green),
            "yellow" => Ok(RiskLevel::Yellow),
            "red" => Ok(RiskLevel::Red),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// Per-component scores, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub flood: f64,
    pub rainfall: f64,
    pub cases: f64,
    pub vulnerability: f64,
}

/// Raw values echoed into the record so a score can be audited later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub rainfall_7day_mm: Option<f64>,
    pub ndwi: Option<f64>,
    pub recent_cases: i64,
    pub recent_deaths: i64,
}

/// The persisted outcome of one scoring run, unique per (region, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub region_id: Uuid,
    pub score_date: NaiveDate,
    pub score: f64,
    pub level: RiskLevel,
    pub components: ComponentScores,
    pub raw: RawInputs,
    pub calculated_at: DateTime<Utc>,
    pub algorithm_version: String,
    pub notes: Option<String>,
}

/// What callers get back from a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub region_id: Uuid,
    pub region_name: String,
    pub score_date: NaiveDate,
    pub score: f64,
    pub level: RiskLevel,
    pub components: ComponentScores,
    pub raw_values: RawInputs,
    pub algorithm_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RiskResult {
    pub fn from_record(record: RiskRecord, region_name: impl Into<String>) -> Self {
        Self {
            region_id: record.region_id,
            region_name: region_name.into(),
            score_date: record.score_date,
            score: record.score,
            level: record.level,
            components: record.components,
            raw_values: record.raw,
            algorithm_version: record.algorithm_version,
            notes: record.notes,
        }
    }
}

/// A region that could not be scored during a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub region_id: Uuid,
    pub region_name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Scored(RiskResult),
    Failed(BatchFailure),
}

impl BatchEntry {
    pub fn region_id(&self) -> Uuid {
        match self {
            BatchEntry::Scored(result) => result.region_id,
            BatchEntry::Failed(failure) => failure.region_id,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, BatchEntry::Scored(_))
    }
}
