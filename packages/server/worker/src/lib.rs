use risk_engine::RiskCalculator;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;

pub mod config;
pub mod jobs;
pub mod tasks;

use jobs::Job;

/// Runs scoring jobs one at a time as they arrive on the channel.
pub struct RiskWorker {
    calculator: Arc<RiskCalculator>,
    rx: Receiver<Job>,
}

impl RiskWorker {
    pub fn new(calculator: Arc<RiskCalculator>, rx: Receiver<Job>) -> Self {
        Self { calculator, rx }
    }

    /// Processes jobs until every sender is dropped. A failing job is logged
    /// and never stops the loop.
    pub async fn run(mut self) -> anyhow::Result<()> {
        tracing::info!("Risk worker waiting for jobs...");

        while let Some(job) = self.rx.recv().await {
            tracing::info!("Processing job: {:?}", job);
            match job {
                Job::CalculateRegion {
                    region_id,
                    score_date,
                } => {
                    if let Err(e) = self
                        .calculator
                        .calculate_for_region(region_id, score_date)
                        .await
                    {
                        tracing::error!("Risk calculation for {} failed: {}", region_id, e);
                    }
                }
                Job::CalculateAll { score_date } => {
                    let batch = tasks::calculate_risk::run_batch(&self.calculator, score_date);
                    if let Err(e) = batch.await {
                        tracing::error!("Scheduled risk calculation failed: {:?}", e);
                    }
                }
            }
        }

        tracing::info!("Job channel closed, risk worker stopping");
        Ok(())
    }
}
