use thiserror::Error;
use uuid::Uuid;

use crate::ports::StoreError;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Region {0} not found")]
    RegionNotFound(Uuid),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<StoreError> for RiskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt(msg) => RiskError::Computation(msg),
            StoreError::Backend(msg) => RiskError::Persistence(msg),
        }
    }
}
