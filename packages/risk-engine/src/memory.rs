use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entities::{CaseAggregate, CaseReport, EnvironmentalObservation, Region, RiskRecord};
use crate::ports::{CaseStore, EnvironmentalStore, RegionStore, RiskStore, StoreError};

#[derive(Default)]
struct Tables {
    regions: Vec<Region>,
    observations: Vec<EnvironmentalObservation>,
    case_reports: Vec<CaseReport>,
    risks: BTreeMap<(Uuid, NaiveDate), RiskRecord>,
    failing_writes: HashSet<Uuid>,
}

/// A process-local backend for every store port.
///
/// "Today" is fixed at construction so case windows are reproducible.
pub struct InMemoryStore {
    today: NaiveDate,
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            tables: RwLock::new(Tables::default()),
        }
    }

    pub async fn insert_region(&self, region: Region) {
        self.tables.write().await.regions.push(region);
    }

    pub async fn insert_observation(&self, observation: EnvironmentalObservation) {
        self.tables.write().await.observations.push(observation);
    }

    pub async fn insert_case_report(&self, report: CaseReport) {
        self.tables.write().await.case_reports.push(report);
    }

    /// Makes every upsert for `region_id` fail with a backend error.
    pub async fn fail_writes_for(&self, region_id: Uuid) {
        self.tables.write().await.failing_writes.insert(region_id);
    }

    pub async fn risk_records(&self) -> Vec<RiskRecord> {
        self.tables.read().await.risks.values().cloned().collect()
    }
}

#[async_trait]
impl RegionStore for InMemoryStore {
    async fn get_region(&self, id: Uuid) -> Result<Option<Region>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.regions.iter().find(|r| r.id == id).cloned())
    }

    async fn list_regions(&self) -> Result<Vec<Region>, StoreError> {
        Ok(self.tables.read().await.regions.clone())
    }
}

#[async_trait]
impl EnvironmentalStore for InMemoryStore {
    async fn latest_observation(
        &self,
        region_id: Uuid,
    ) -> Result<Option<EnvironmentalObservation>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .observations
            .iter()
            .filter(|o| o.region_id == region_id)
            .max_by_key(|o| o.observation_date)
            .cloned())
    }
}

#[async_trait]
impl CaseStore for InMemoryStore {
    async fn recent_case_aggregate(
        &self,
        region_id: Uuid,
        window_days: u32,
    ) -> Result<CaseAggregate, StoreError> {
        let start = self.today - Duration::days(i64::from(window_days));
        let tables = self.tables.read().await;

        let aggregate = tables
            .case_reports
            .iter()
            .filter(|c| c.region_id == region_id && c.report_date >= start)
            .fold(CaseAggregate::default(), |acc, c| {
                CaseAggregate::new(acc.cases + c.new_cases, acc.deaths + c.deaths)
            });

        Ok(aggregate)
    }
}

#[async_trait]
impl RiskStore for InMemoryStore {
    async fn upsert(&self, record: &RiskRecord) -> Result<RiskRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.failing_writes.contains(&record.region_id) {
            return Err(StoreError::Backend(format!(
                "write rejected for region {}",
                record.region_id
            )));
        }

        tables
            .risks
            .insert((record.region_id, record.score_date), record.clone());
        Ok(record.clone())
    }

    async fn latest_per_region(&self) -> Result<Vec<RiskRecord>, StoreError> {
        let tables = self.tables.read().await;
        let mut latest: BTreeMap<Uuid, &RiskRecord> = BTreeMap::new();
        // Keys are ordered by (region, date), so the last one per region wins.
        for ((region_id, _), record) in tables.risks.iter() {
            latest.insert(*region_id, record);
        }
        Ok(latest.into_values().cloned().collect())
    }

    async fn history(
        &self,
        region_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<RiskRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .risks
            .range((region_id, since)..=(region_id, NaiveDate::MAX))
            .map(|(_, record)| record.clone())
            .collect())
    }
}
