pub mod case_repo;
pub mod environmental_repo;
pub mod region_repo;
pub mod risk_repo;

pub use case_repo::CaseRepository;
pub use environmental_repo::EnvironmentalRepository;
pub use region_repo::RegionRepository;
pub use risk_repo::RiskScoreRepository;

use risk_engine::StoreError;

/// Decode failures mean the stored data is bad; everything else is the backend.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Corrupt(err.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}
