use async_trait::async_trait;
use risk_engine::ports::RegionStore;
use risk_engine::{Region, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use super::store_error;
use crate::models::RegionRow;

pub struct RegionRepository {
    pool: PgPool,
}

impl RegionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> sqlx::Result<Option<RegionRow>> {
        sqlx::query_as::<_, RegionRow>("SELECT * FROM regions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self) -> sqlx::Result<Vec<RegionRow>> {
        sqlx::query_as::<_, RegionRow>("SELECT * FROM regions ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
    }
}

#[async_trait]
impl RegionStore for RegionRepository {
    async fn get_region(&self, id: Uuid) -> Result<Option<Region>, StoreError> {
        let row = self.find_by_id(id).await.map_err(store_error)?;
        Ok(row.map(Region::from))
    }

    async fn list_regions(&self) -> Result<Vec<Region>, StoreError> {
        let rows = self.list().await.map_err(store_error)?;
        Ok(rows.into_iter().map(Region::from).collect())
    }
}
