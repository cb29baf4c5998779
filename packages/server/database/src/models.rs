use chrono::{DateTime, NaiveDate, Utc};
use risk_engine::{
    ComponentScores, EnvironmentalObservation, RawInputs, Region, RiskLevel, RiskRecord,
    StoreError,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct RegionRow {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub water_coverage_pct: Option<f64>,
    pub sanitation_coverage_pct: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegionRow> for Region {
    fn from(row: RegionRow) -> Self {
        Region {
            id: row.id,
            name: row.name,
            water_coverage_pct: row.water_coverage_pct,
            sanitation_coverage_pct: row.sanitation_coverage_pct,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct EnvironmentalObservationRow {
    pub id: Uuid,
    pub region_id: Uuid,
    pub observation_date: NaiveDate,
    pub ndwi: Option<f64>,
    pub flood_extent_pct: Option<f64>,
    pub rainfall_7day_mm: Option<f64>,
    pub rainfall_30day_mm: Option<f64>,
    pub data_source: Option<String>, // 'GEE', 'NASA_GPM', ...
    pub created_at: DateTime<Utc>,
}

impl From<EnvironmentalObservationRow> for EnvironmentalObservation {
    fn from(row: EnvironmentalObservationRow) -> Self {
        EnvironmentalObservation {
            region_id: row.region_id,
            observation_date: row.observation_date,
            ndwi: row.ndwi,
            flood_extent_pct: row.flood_extent_pct,
            rainfall_7day_mm: row.rainfall_7day_mm,
            rainfall_30day_mm: row.rainfall_30day_mm,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct RiskScoreRow {
    pub id: Uuid,
    pub region_id: Uuid,
    pub score_date: NaiveDate,
    pub score: f64,
    pub level: String, // 'green' | 'yellow' | 'red'
    pub flood_score: Option<f64>,
    pub rainfall_score: Option<f64>,
    pub case_score: Option<f64>,
    pub vulnerability_score: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub ndwi: Option<f64>,
    pub recent_cases: Option<i64>,
    pub recent_deaths: Option<i64>,
    pub calculated_at: DateTime<Utc>,
    pub algorithm_version: String,
    pub notes: Option<String>,
}

impl TryFrom<RiskScoreRow> for RiskRecord {
    type Error = StoreError;

    fn try_from(row: RiskScoreRow) -> Result<Self, Self::Error> {
        let level: RiskLevel = row
            .level
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("risk score {}: {}", row.id, e)))?;

        Ok(RiskRecord {
            region_id: row.region_id,
            score_date: row.score_date,
            score: row.score,
            level,
            // Rows written before component tracking carry NULLs.
            components: ComponentScores {
                flood: row.flood_score.unwrap_or_default(),
                rainfall: row.rainfall_score.unwrap_or_default(),
                cases: row.case_score.unwrap_or_default(),
                vulnerability: row.vulnerability_score.unwrap_or_default(),
            },
            raw: RawInputs {
                rainfall_7day_mm: row.rainfall_mm,
                ndwi: row.ndwi,
                recent_cases: row.recent_cases.unwrap_or_default(),
                recent_deaths: row.recent_deaths.unwrap_or_default(),
            },
            calculated_at: row.calculated_at,
            algorithm_version: row.algorithm_version,
            notes: row.notes,
        })
    }
}
