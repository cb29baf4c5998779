//! Outbreak risk scoring for administrative regions.
//!
//! [`RiskCalculator`] reads a region's static attributes, its latest
//! environmental observation and its recent case counts through the store
//! ports in [`ports`], and persists one [`RiskRecord`] per region per day.

pub mod calculator;
pub mod config;
pub mod entities;
pub mod error;
pub mod memory;
pub mod ports;
pub mod scoring;
pub mod summary;

pub use calculator::RiskCalculator;
pub use config::{ConfigError, ScoringConfig};
pub use entities::{
    BatchEntry, BatchFailure, CaseAggregate, CaseReport, ComponentScores,
    EnvironmentalObservation, RawInputs, Region, RiskLevel, RiskRecord, RiskResult,
};
pub use error::RiskError;
pub use memory::InMemoryStore;
pub use ports::{Stores, StoreError};
pub use summary::{summarize_history, BatchSummary, RiskTrend};
