use async_trait::async_trait;
use risk_engine::ports::EnvironmentalStore;
use risk_engine::{EnvironmentalObservation, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use super::store_error;
use crate::models::EnvironmentalObservationRow;

pub struct EnvironmentalRepository {
    pool: PgPool,
}

impl EnvironmentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnvironmentalStore for EnvironmentalRepository {
    async fn latest_observation(
        &self,
        region_id: Uuid,
    ) -> Result<Option<EnvironmentalObservation>, StoreError> {
        let row = sqlx::query_as::<_, EnvironmentalObservationRow>(
            r#"
            SELECT * FROM environmental_observations
            WHERE region_id = $1
            ORDER BY observation_date DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(region_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(EnvironmentalObservation::from))
    }
}
