pub mod calculate_risk;
pub mod schedule;
