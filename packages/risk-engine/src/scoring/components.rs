use crate::config::{ScoringConfig, Weights};
use crate::entities::{CaseAggregate, ComponentScores, Region};

/// Flood component from NDWI and flood extent.
///
/// A missing input contributes nothing and the remaining weight is not
/// redistributed, so partial data lowers the score.
pub fn flood_score(
    ndwi: Option<f64>,
    flood_extent_pct: Option<f64>,
    config: &ScoringConfig,
) -> f64 {
    if ndwi.is_none() && flood_extent_pct.is_none() {
        return 0.0;
    }

    let mut score = 0.0;
    if let Some(ndwi) = ndwi {
        score += config.flood_ndwi_weight * config.ranges.ndwi.normalize(ndwi);
    }
    if let Some(extent) = flood_extent_pct {
        score += config.flood_extent_weight * config.ranges.flood_extent_pct.normalize(extent);
    }

    score.clamp(0.0, 1.0)
}

/// Rainfall component. Without a 7-day accumulation the component is 0; the
/// 30-day accumulation only refines a known 7-day value.
pub fn rainfall_score(
    rainfall_7day_mm: Option<f64>,
    rainfall_30day_mm: Option<f64>,
    config: &ScoringConfig,
) -> f64 {
    let Some(seven_day) = rainfall_7day_mm else {
        return 0.0;
    };

    let mut score = config.ranges.rainfall_7day_mm.normalize(seven_day);
    if let Some(thirty_day) = rainfall_30day_mm {
        let sustained = config.ranges.rainfall_30day_mm.normalize(thirty_day);
        score = config.rainfall_7day_weight * score + config.rainfall_30day_weight * sustained;
    }

    score.clamp(0.0, 1.0)
}

/// Epidemiological component: recent case volume, boosted when the case
/// fatality rate is high.
pub fn case_score(aggregate: &CaseAggregate, config: &ScoringConfig) -> f64 {
    let mut score = config.ranges.recent_cases.normalize(aggregate.cases as f64);

    if let Some(cfr) = aggregate.cfr() {
        if cfr > config.high_cfr_threshold {
            score = (score * config.high_cfr_multiplier).min(1.0);
        }
    }

    score
}

/// Infrastructure vulnerability: lower water and sanitation coverage means a
/// higher score.
///
/// Only an unrecorded coverage takes the default. A recorded 0 scores as 0%
/// coverage.
pub fn vulnerability_score(region: &Region, config: &ScoringConfig) -> f64 {
    let water = region
        .water_coverage_pct
        .unwrap_or(config.default_coverage_pct);
    let sanitation = region
        .sanitation_coverage_pct
        .unwrap_or(config.default_coverage_pct);

    let score = 0.5 * (1.0 - water / 100.0) + 0.5 * (1.0 - sanitation / 100.0);
    score.clamp(0.0, 1.0)
}

/// Weighted sum of the components, clamped to [0, 1].
pub fn composite(components: &ComponentScores, weights: &Weights) -> f64 {
    let score = weights.flood * components.flood
        + weights.rainfall * components.rainfall
        + weights.cases * components.cases
        + weights.vulnerability * components.vulnerability;
    score.clamp(0.0, 1.0)
}
