use anyhow::{Context, Result};
use risk_engine::Stores;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

pub use sqlx; // Re-export for convenience
pub mod models;
pub mod repositories;

use repositories::{CaseRepository, EnvironmentalRepository, RegionRepository, RiskScoreRepository};

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Connects to the PostgreSQL database with production-ready pool settings.
    pub async fn connect(database_url: &str) -> Result<Arc<Self>> {
        let pool = PgPoolOptions::new()
            .max_connections(10) // One batch run is sequential; leave room for ad-hoc runs
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(3)) // Fail fast if DB is overloaded
            .idle_timeout(Duration::from_secs(60 * 5)) // Close idle connections after 5m
            .test_before_acquire(true) // Health check on checkout
            .connect(database_url)
            .await
            .context("Failed to connect to the database")?;

        Ok(Arc::new(Self { pool }))
    }

    /// Runs pending migrations. Safe to run on startup due to Postgres advisory locks.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("src/migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    /// Wires the Postgres repositories into the scoring engine's store ports.
    pub fn risk_stores(&self) -> Stores {
        Stores {
            regions: Arc::new(RegionRepository::new(self.pool.clone())),
            environment: Arc::new(EnvironmentalRepository::new(self.pool.clone())),
            cases: Arc::new(CaseRepository::new(self.pool.clone())),
            risks: Arc::new(RiskScoreRepository::new(self.pool.clone())),
        }
    }
}
