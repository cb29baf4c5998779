use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A daily case report for a region, as ingested by the reporting pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub region_id: Uuid,
    pub report_date: NaiveDate,
    pub new_cases: i64,
    pub deaths: i64,
}

/// Case and death totals over a trailing window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseAggregate {
    pub cases: i64,
    pub deaths: i64,
}

impl CaseAggregate {
    pub fn new(cases: i64, deaths: i64) -> Self {
        Self { cases, deaths }
    }

    /// Case fatality rate, `None` when there are no cases.
    pub fn cfr(&self) -> Option<f64> {
        if self.cases > 0 {
            Some(self.deaths as f64 / self.cases as f64)
        } else {
            None
        }
    }
}
