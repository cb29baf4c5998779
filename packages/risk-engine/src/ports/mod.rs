pub mod stores;

pub use stores::{CaseStore, EnvironmentalStore, RegionStore, RiskStore, StoreError, Stores};
