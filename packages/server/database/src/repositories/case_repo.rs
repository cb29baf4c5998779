use async_trait::async_trait;
use risk_engine::ports::CaseStore;
use risk_engine::{CaseAggregate, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use super::store_error;

// SUM over INTEGER yields BIGINT; an empty window yields NULL. The window ends
// on the UTC date, matching the calculator's default score date, whatever the
// session time zone is.
const RECENT_CASES_SQL: &str = r#"
    SELECT
        COALESCE(SUM(new_cases), 0)::BIGINT,
        COALESCE(SUM(deaths), 0)::BIGINT
    FROM case_reports
    WHERE region_id = $1
      AND report_date >= (NOW() AT TIME ZONE 'UTC')::DATE - $2::INTEGER
"#;

pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseStore for CaseRepository {
    async fn recent_case_aggregate(
        &self,
        region_id: Uuid,
        window_days: u32,
    ) -> Result<CaseAggregate, StoreError> {
        let window = i32::try_from(window_days)
            .map_err(|_| StoreError::Backend(format!("case window too large: {}", window_days)))?;

        let (cases, deaths) = sqlx::query_as::<_, (i64, i64)>(RECENT_CASES_SQL)
            .bind(region_id)
            .bind(window)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(CaseAggregate::new(cases, deaths))
    }
}
