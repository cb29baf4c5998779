use async_trait::async_trait;
use chrono::NaiveDate;
use risk_engine::ports::RiskStore;
use risk_engine::{RiskRecord, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use super::store_error;
use crate::models::RiskScoreRow;

pub struct RiskScoreRepository {
    pool: PgPool,
}

impl RiskScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_records(rows: Vec<RiskScoreRow>) -> Result<Vec<RiskRecord>, StoreError> {
    rows.into_iter().map(RiskRecord::try_from).collect()
}

#[async_trait]
impl RiskStore for RiskScoreRepository {
    async fn upsert(&self, record: &RiskRecord) -> Result<RiskRecord, StoreError> {
        // The unique (region_id, score_date) constraint makes this last-writer-wins.
        let row = sqlx::query_as::<_, RiskScoreRow>(
            r#"
            INSERT INTO risk_scores (
                region_id, score_date, score, level,
                flood_score, rainfall_score, case_score, vulnerability_score,
                rainfall_mm, ndwi, recent_cases, recent_deaths,
                calculated_at, algorithm_version, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (region_id, score_date) DO UPDATE
            SET score = EXCLUDED.score,
                level = EXCLUDED.level,
                flood_score = EXCLUDED.flood_score,
                rainfall_score = EXCLUDED.rainfall_score,
                case_score = EXCLUDED.case_score,
                vulnerability_score = EXCLUDED.vulnerability_score,
                rainfall_mm = EXCLUDED.rainfall_mm,
                ndwi = EXCLUDED.ndwi,
                recent_cases = EXCLUDED.recent_cases,
                recent_deaths = EXCLUDED.recent_deaths,
                calculated_at = EXCLUDED.calculated_at,
                algorithm_version = EXCLUDED.algorithm_version,
                notes = EXCLUDED.notes
            RETURNING *
            "#,
        )
        .bind(record.region_id)
        .bind(record.score_date)
        .bind(record.score)
        .bind(record.level.as_str())
        .bind(record.components.flood)
        .bind(record.components.rainfall)
        .bind(record.components.cases)
        .bind(record.components.vulnerability)
        .bind(record.raw.rainfall_7day_mm)
        .bind(record.raw.ndwi)
        .bind(record.raw.recent_cases)
        .bind(record.raw.recent_deaths)
        .bind(record.calculated_at)
        .bind(&record.algorithm_version)
        .bind(&record.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        RiskRecord::try_from(row)
    }

    async fn latest_per_region(&self) -> Result<Vec<RiskRecord>, StoreError> {
        let rows = sqlx::query_as::<_, RiskScoreRow>(
            r#"
            SELECT DISTINCT ON (region_id) *
            FROM risk_scores
            ORDER BY region_id, score_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        into_records(rows)
    }

    async fn history(
        &self,
        region_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<RiskRecord>, StoreError> {
        let rows = sqlx::query_as::<_, RiskScoreRow>(
            r#"
            SELECT * FROM risk_scores
            WHERE region_id = $1 AND score_date >= $2
            ORDER BY score_date
            "#,
        )
        .bind(region_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        into_records(rows)
    }
}
