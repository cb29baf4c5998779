use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An administrative area scored as one unit (e.g. a local government area).
///
/// Coverage attributes are percentages in 0..=100. `None` means the value was
/// never recorded, and scoring falls back to the configured default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: Uuid,
    pub name: String,
    pub water_coverage_pct: Option<f64>,
    pub sanitation_coverage_pct: Option<f64>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            water_coverage_pct: None,
            sanitation_coverage_pct: None,
        }
    }

    pub fn with_coverage(mut self, water_pct: f64, sanitation_pct: f64) -> Self {
        self.water_coverage_pct = Some(water_pct);
        self.sanitation_coverage_pct = Some(sanitation_pct);
        self
    }
}
