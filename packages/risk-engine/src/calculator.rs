use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::entities::{BatchEntry, BatchFailure, RiskRecord, RiskResult};
use crate::error::RiskError;
use crate::ports::Stores;
use crate::scoring::assess;

/// Blends environmental, epidemiological and infrastructure signals into a
/// daily risk record per region.
///
/// The calculator holds no state of its own. Every run reads its inputs from
/// the stores and writes exactly one record keyed by (region, date).
pub struct RiskCalculator {
    stores: Stores,
    config: ScoringConfig,
}

impl RiskCalculator {
    pub fn new(stores: Stores, config: ScoringConfig) -> Self {
        Self { stores, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores one region for `score_date` (today when `None`) and upserts the
    /// record.
    ///
    /// The environmental input is the latest observation regardless of
    /// `score_date`, and the case window always ends today.
    pub async fn calculate_for_region(
        &self,
        region_id: Uuid,
        score_date: Option<NaiveDate>,
    ) -> Result<RiskResult, RiskError> {
        let score_date = score_date.unwrap_or_else(today);

        let region = self
            .stores
            .regions
            .get_region(region_id)
            .await?
            .ok_or(RiskError::RegionNotFound(region_id))?;

        let observation = self.stores.environment.latest_observation(region_id).await?;
        let cases = self
            .stores
            .cases
            .recent_case_aggregate(region_id, self.config.case_window_days)
            .await?;

        let assessment = assess(&region, observation.as_ref(), cases, &self.config)?;
        debug!(
            region = %region.name,
            flood = assessment.components.flood,
            rainfall = assessment.components.rainfall,
            cases = assessment.components.cases,
            vulnerability = assessment.components.vulnerability,
            "Computed risk components"
        );

        let record = RiskRecord {
            region_id,
            score_date,
            score: assessment.score,
            level: assessment.level,
            components: assessment.components,
            raw: assessment.raw,
            calculated_at: Utc::now(),
            algorithm_version: self.config.algorithm_version.clone(),
            notes: assessment.notes,
        };

        let stored = match self.stores.risks.upsert(&record).await {
            Ok(stored) => stored,
            Err(e) => {
                error!("Failed to store risk for region {} on {}: {}", region_id, score_date, e);
                return Err(e.into());
            }
        };

        info!(
            "Risk for {} on {}: {} ({})",
            region.name, stored.score_date, stored.score, stored.level
        );

        Ok(RiskResult::from_record(stored, region.name))
    }

    /// Scores every known region for the same date. A failing region becomes
    /// a `BatchEntry::Failed` and never stops the rest of the batch.
    ///
    /// Only a failure to list regions aborts the whole run.
    pub async fn calculate_all(
        &self,
        score_date: Option<NaiveDate>,
    ) -> Result<Vec<BatchEntry>, RiskError> {
        let score_date = score_date.unwrap_or_else(today);
        let regions = self.stores.regions.list_regions().await?;

        info!(
            "Calculating risk for {} regions on {}",
            regions.len(),
            score_date
        );

        let mut entries = Vec::with_capacity(regions.len());
        for region in regions {
            match self.calculate_for_region(region.id, Some(score_date)).await {
                Ok(result) => entries.push(BatchEntry::Scored(result)),
                Err(e) => {
                    error!("Error calculating risk for region {}: {}", region.id, e);
                    entries.push(BatchEntry::Failed(BatchFailure {
                        region_id: region.id,
                        region_name: region.name,
                        error: e.to_string(),
                    }));
                }
            }
        }

        let failed = entries.iter().filter(|e| !e.is_scored()).count();
        info!(
            "Risk calculation complete: {} scored, {} failed",
            entries.len() - failed,
            failed
        );

        Ok(entries)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
