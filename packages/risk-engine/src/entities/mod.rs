pub mod case;
pub mod observation;
pub mod region;
pub mod risk;

pub use case::{CaseAggregate, CaseReport};
pub use observation::EnvironmentalObservation;
pub use region::Region;
pub use risk::{
    BatchEntry, BatchFailure, ComponentScores, RawInputs, RiskLevel, RiskRecord, RiskResult,
};
