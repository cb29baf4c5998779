use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Satellite and weather derived indicators for one region on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalObservation {
    pub region_id: Uuid,
    pub observation_date: NaiveDate,
    /// Normalized Difference Water Index, nominally -1..1.
    pub ndwi: Option<f64>,
    pub flood_extent_pct: Option<f64>,
    pub rainfall_7day_mm: Option<f64>,
    pub rainfall_30day_mm: Option<f64>,
}

impl EnvironmentalObservation {
    pub fn new(region_id: Uuid, observation_date: NaiveDate) -> Self {
        Self {
            region_id,
            observation_date,
            ndwi: None,
            flood_extent_pct: None,
            rainfall_7day_mm: None,
            rainfall_30day_mm: None,
        }
    }

    pub fn with_flood(mut self, ndwi: Option<f64>, flood_extent_pct: Option<f64>) -> Self {
        self.ndwi = ndwi;
        self.flood_extent_pct = flood_extent_pct;
        self
    }

    pub fn with_rainfall(mut self, seven_day_mm: Option<f64>, thirty_day_mm: Option<f64>) -> Self {
        self.rainfall_7day_mm = seven_day_mm;
        self.rainfall_30day_mm = thirty_day_mm;
        self
    }
}
