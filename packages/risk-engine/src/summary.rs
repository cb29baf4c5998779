use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{BatchEntry, RiskLevel, RiskRecord};
use crate::scoring::round_to;

/// Tally of a batch run, for logs and operator output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry {
                BatchEntry::Scored(result) => match result.level {
                    RiskLevel::Green => summary.green += 1,
                    RiskLevel::Yellow => summary.yellow += 1,
                    RiskLevel::Red => summary.red += 1,
                },
                BatchEntry::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn scored(&self) -> usize {
        self.green + self.yellow + self.red
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub score: f64,
}

/// A region's risk time series with its average and current level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTrend {
    pub points: Vec<TrendPoint>,
    pub avg_score: f64,
    /// Level of the most recent record, or "unknown" without history.
    pub current_level: String,
}

/// Summarizes records ordered oldest first.
pub fn summarize_history(records: &[RiskRecord]) -> RiskTrend {
    let points: Vec<TrendPoint> = records
        .iter()
        .map(|r| TrendPoint {
            date: r.score_date,
            score: r.score,
        })
        .collect();

    let avg_score = if points.is_empty() {
        0.0
    } else {
        let total: f64 = points.iter().map(|p| p.score).sum();
        round_to(total / points.len() as f64, 3)
    };

    let current_level = records
        .last()
        .map(|r| r.level.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    RiskTrend {
        points,
        avg_score,
        current_level,
    }
}
