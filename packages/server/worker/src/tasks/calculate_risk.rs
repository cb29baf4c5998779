use anyhow::{Context, Result};
use chrono::NaiveDate;
use risk_engine::{BatchEntry, BatchSummary, RiskCalculator};
use tracing::info;

/// Scores every region once and logs the level tally.
pub async fn run_batch(
    calculator: &RiskCalculator,
    score_date: Option<NaiveDate>,
) -> Result<(Vec<BatchEntry>, BatchSummary)> {
    info!("Running risk calculation for all regions...");

    let entries = calculator
        .calculate_all(score_date)
        .await
        .context("Failed to list regions for risk calculation")?;
    let summary = BatchSummary::from_entries(&entries);

    info!(
        "Calculated risk scores for {} regions (green={}, yellow={}, red={}, failed={})",
        entries.len(),
        summary.green,
        summary.yellow,
        summary.red,
        summary.failed
    );

    Ok((entries, summary))
}
