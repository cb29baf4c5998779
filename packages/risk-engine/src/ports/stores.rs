use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{CaseAggregate, EnvironmentalObservation, Region, RiskRecord};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Stored data could not be turned into a domain value.
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait RegionStore: Send + Sync {
    async fn get_region(&self, id: Uuid) -> Result<Option<Region>, StoreError>;
    async fn list_regions(&self) -> Result<Vec<Region>, StoreError>;
}

#[async_trait]
pub trait EnvironmentalStore: Send + Sync {
    /// Most recent observation by date, with no date filter.
    async fn latest_observation(
        &self,
        region_id: Uuid,
    ) -> Result<Option<EnvironmentalObservation>, StoreError>;
}

#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Case and death sums over the trailing window ending today (UTC).
    async fn recent_case_aggregate(
        &self,
        region_id: Uuid,
        window_days: u32,
    ) -> Result<CaseAggregate, StoreError>;
}

#[async_trait]
pub trait RiskStore: Send + Sync {
    /// Insert-or-replace keyed by (region_id, score_date). Must be atomic per
    /// key. Returns the record as stored.
    async fn upsert(&self, record: &RiskRecord) -> Result<RiskRecord, StoreError>;

    /// The record with the greatest score date for every scored region.
    async fn latest_per_region(&self) -> Result<Vec<RiskRecord>, StoreError>;

    /// Records for a region with `score_date >= since`, oldest first.
    async fn history(&self, region_id: Uuid, since: NaiveDate)
        -> Result<Vec<RiskRecord>, StoreError>;
}

/// The collaborators a calculator reads from and writes to.
#[derive(Clone)]
pub struct Stores {
    pub regions: Arc<dyn RegionStore>,
    pub environment: Arc<dyn EnvironmentalStore>,
    pub cases: Arc<dyn CaseStore>,
    pub risks: Arc<dyn RiskStore>,
}

impl Stores {
    /// Uses one backend for every port.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: RegionStore + EnvironmentalStore + CaseStore + RiskStore + 'static,
    {
        Self {
            regions: backend.clone(),
            environment: backend.clone(),
            cases: backend.clone(),
            risks: backend,
        }
    }
}
