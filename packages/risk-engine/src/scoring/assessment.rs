use super::components::{case_score, composite, flood_score, rainfall_score, vulnerability_score};
use super::round_to;
use crate::config::ScoringConfig;
use crate::entities::{
    CaseAggregate, ComponentScores, EnvironmentalObservation, RawInputs, Region, RiskLevel,
};
use crate::error::RiskError;

/// Decimal places kept for the composite and component scores.
const SCORE_DECIMALS: i32 = 4;

/// The scored view of one region's inputs, before it is stamped and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub score: f64,
    pub level: RiskLevel,
    pub components: ComponentScores,
    pub raw: RawInputs,
    pub notes: Option<String>,
}

/// Scores a region from its static attributes, its latest environmental
/// observation (if any) and its recent case aggregate.
///
/// The level is classified from the exact composite; only the stored and
/// returned scores are rounded to four decimals. A score just under a
/// threshold can therefore round up onto it and keep the lower level.
pub fn assess(
    region: &Region,
    observation: Option<&EnvironmentalObservation>,
    cases: CaseAggregate,
    config: &ScoringConfig,
) -> Result<Assessment, RiskError> {
    check_inputs(region, observation, &cases)?;

    let (flood, rainfall) = match observation {
        Some(obs) => (
            flood_score(obs.ndwi, obs.flood_extent_pct, config),
            rainfall_score(obs.rainfall_7day_mm, obs.rainfall_30day_mm, config),
        ),
        None => (0.0, 0.0),
    };

    let raw_components = ComponentScores {
        flood,
        rainfall,
        cases: case_score(&cases, config),
        vulnerability: vulnerability_score(region, config),
    };
    let total = composite(&raw_components, &config.weights);
    let score = round_to(total, SCORE_DECIMALS);

    let components = ComponentScores {
        flood: round_to(raw_components.flood, SCORE_DECIMALS),
        rainfall: round_to(raw_components.rainfall, SCORE_DECIMALS),
        cases: round_to(raw_components.cases, SCORE_DECIMALS),
        vulnerability: round_to(raw_components.vulnerability, SCORE_DECIMALS),
    };

    Ok(Assessment {
        score,
        level: RiskLevel::from_score(total, &config.thresholds),
        components,
        raw: RawInputs {
            rainfall_7day_mm: observation.and_then(|o| o.rainfall_7day_mm),
            ndwi: observation.and_then(|o| o.ndwi),
            recent_cases: cases.cases,
            recent_deaths: cases.deaths,
        },
        notes: degraded_inputs(region, observation),
    })
}

fn check_inputs(
    region: &Region,
    observation: Option<&EnvironmentalObservation>,
    cases: &CaseAggregate,
) -> Result<(), RiskError> {
    let mut values = vec![
        ("water_coverage_pct", region.water_coverage_pct),
        ("sanitation_coverage_pct", region.sanitation_coverage_pct),
    ];
    if let Some(obs) = observation {
        values.extend([
            ("ndwi", obs.ndwi),
            ("flood_extent_pct", obs.flood_extent_pct),
            ("rainfall_7day_mm", obs.rainfall_7day_mm),
            ("rainfall_30day_mm", obs.rainfall_30day_mm),
        ]);
    }

    for (field, value) in values {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(RiskError::Computation(format!(
                    "region {} has non-finite {}: {}",
                    region.id, field, v
                )));
            }
        }
    }

    if cases.cases < 0 || cases.deaths < 0 {
        return Err(RiskError::Computation(format!(
            "region {} has negative case aggregate (cases={}, deaths={})",
            region.id, cases.cases, cases.deaths
        )));
    }

    Ok(())
}

fn degraded_inputs(
    region: &Region,
    observation: Option<&EnvironmentalObservation>,
) -> Option<String> {
    let mut notes = Vec::new();

    match observation {
        None => notes.push("no environmental observation"),
        Some(obs) => {
            if obs.ndwi.is_none() {
                notes.push("ndwi missing");
            }
            if obs.flood_extent_pct.is_none() {
                notes.push("flood extent missing");
            }
            if obs.rainfall_7day_mm.is_none() {
                notes.push("rainfall_7day missing");
            }
        }
    }
    if region.water_coverage_pct.is_none() {
        notes.push("water coverage defaulted");
    }
    if region.sanitation_coverage_pct.is_none() {
        notes.push("sanitation coverage defaulted");
    }

    if notes.is_empty() {
        None
    } else {
        Some(notes.join("; "))
    }
}
