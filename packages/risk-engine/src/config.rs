use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sum tolerance when checking that component weights add up to one.
const WEIGHT_EPSILON: f64 = 1e-9;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Component weights must sum to 1.0, got {0}")]
    WeightSum(f64),
    #[error("Level thresholds must satisfy 0 < yellow < red <= 1, got yellow={yellow} red={red}")]
    Thresholds { yellow: f64, red: f64 },
    #[error("Normalization range '{name}' has min {min} greater than max {max}")]
    Range { name: &'static str, min: f64, max: f64 },
}

/// A linear reference range used to map a raw value onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn normalize(&self, value: f64) -> f64 {
        crate::scoring::normalize(value, self.min, self.max)
    }
}

/// Weights of the four components in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub flood: f64,
    pub rainfall: f64,
    pub cases: f64,
    pub vulnerability: f64,
}

impl Weights {
    pub fn total(&self) -> f64 {
        self.flood + self.rainfall + self.cases + self.vulnerability
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            flood: 0.4,
            rainfall: 0.2,
            cases: 0.3,
            vulnerability: 0.1,
        }
    }
}

/// Lower-inclusive bounds of the yellow and red levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub yellow: f64,
    pub red: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            yellow: 0.3,
            red: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationRanges {
    pub ndwi: Range,
    pub flood_extent_pct: Range,
    pub rainfall_7day_mm: Range,
    pub rainfall_30day_mm: Range,
    pub recent_cases: Range,
}

impl Default for NormalizationRanges {
    fn default() -> Self {
        Self {
            ndwi: Range::new(-0.5, 0.8),
            flood_extent_pct: Range::new(0.0, 30.0),
            rainfall_7day_mm: Range::new(0.0, 200.0),
            rainfall_30day_mm: Range::new(0.0, 500.0),
            recent_cases: Range::new(0.0, 50.0),
        }
    }
}

/// Everything the scoring engine needs to turn raw inputs into a risk record.
///
/// The defaults are algorithm version "1.0". Any change to a weight, range or
/// threshold should come with a new `algorithm_version` so stored records stay
/// comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub algorithm_version: String,
    pub weights: Weights,
    pub thresholds: LevelThresholds,
    pub ranges: NormalizationRanges,
    /// Share of the flood component carried by NDWI (the rest is flood extent).
    pub flood_ndwi_weight: f64,
    pub flood_extent_weight: f64,
    /// Blend between 7-day and 30-day rainfall when both are known.
    pub rainfall_7day_weight: f64,
    pub rainfall_30day_weight: f64,
    /// Case fatality rate above which the case score is boosted.
    pub high_cfr_threshold: f64,
    pub high_cfr_multiplier: f64,
    /// Coverage assumed when a region has no recorded value.
    pub default_coverage_pct: f64,
    pub case_window_days: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            algorithm_version: "1.0".to_string(),
            weights: Weights::default(),
            thresholds: LevelThresholds::default(),
            ranges: NormalizationRanges::default(),
            flood_ndwi_weight: 0.6,
            flood_extent_weight: 0.4,
            rainfall_7day_weight: 0.7,
            rainfall_30day_weight: 0.3,
            high_cfr_threshold: 0.05,
            high_cfr_multiplier: 1.3,
            default_coverage_pct: 50.0,
            case_window_days: 14,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ConfigError::WeightSum(total));
        }

        let LevelThresholds { yellow, red } = self.thresholds;
        if !(yellow > 0.0 && yellow < red && red <= 1.0) {
            return Err(ConfigError::Thresholds { yellow, red });
        }

        let ranges = [
            ("ndwi", self.ranges.ndwi),
            ("flood_extent_pct", self.ranges.flood_extent_pct),
            ("rainfall_7day_mm", self.ranges.rainfall_7day_mm),
            ("rainfall_30day_mm", self.ranges.rainfall_30day_mm),
            ("recent_cases", self.ranges.recent_cases),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(ConfigError::Range {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(())
    }
}
