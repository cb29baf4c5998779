use async_trait::async_trait;
use chrono::NaiveDate;
use risk_engine::ports::{RegionStore, RiskStore, StoreError};
use risk_engine::{
    summarize_history, BatchEntry, BatchSummary, CaseReport, EnvironmentalObservation,
    InMemoryStore, Region, RiskCalculator, RiskError, RiskLevel, RiskRecord, ScoringConfig,
    Stores,
};
use std::sync::Arc;
use uuid::Uuid;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn setup() -> (Arc<InMemoryStore>, RiskCalculator) {
    let store = Arc::new(InMemoryStore::new(date(8, 20)));
    let calculator = RiskCalculator::new(
        Stores::from_backend(store.clone()),
        ScoringConfig::default(),
    );
    (store, calculator)
}

/// Seeds a region matching the worked example: flooded, wet, high CFR.
async fn seed_flooded_region(store: &InMemoryStore, name: &str) -> Uuid {
    let region = Region::new(name).with_coverage(40.0, 35.0);
    let id = region.id;
    store.insert_region(region).await;
    store
        .insert_observation(
            EnvironmentalObservation::new(id, date(8, 18))
                .with_flood(Some(0.6), Some(20.0))
                .with_rainfall(Some(150.0), Some(400.0)),
        )
        .await;
    for (day, cases, deaths) in [(8, 15, 1), (12, 15, 1), (19, 10, 1)] {
        store
            .insert_case_report(CaseReport {
                region_id: id,
                report_date: date(8, day),
                new_cases: cases,
                deaths,
            })
            .await;
    }
    id
}

#[tokio::test]
async fn test_worked_example_end_to_end() {
    let (store, calculator) = setup();
    let id = seed_flooded_region(&store, "Calabar Municipal").await;

    let result = calculator
        .calculate_for_region(id, Some(date(8, 20)))
        .await
        .unwrap();

    assert_eq!(result.region_name, "Calabar Municipal");
    assert_eq!(result.score_date, date(8, 20));
    assert_eq!(result.score, 0.8252);
    assert_eq!(result.level, RiskLevel::Red);
    assert_eq!(result.components.flood, 0.7744);
    assert_eq!(result.components.rainfall, 0.765);
    assert_eq!(result.components.cases, 1.0);
    assert_eq!(result.components.vulnerability, 0.625);
    assert_eq!(result.raw_values.recent_cases, 40);
    assert_eq!(result.raw_values.recent_deaths, 3);
    assert_eq!(result.algorithm_version, "1.0");

    let records = store.risk_records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, result.score);
    assert_eq!(records[0].level, result.level);
}

#[tokio::test]
async fn test_recalculation_updates_in_place() {
    let (store, calculator) = setup();
    let id = seed_flooded_region(&store, "Bakassi").await;

    let first = calculator
        .calculate_for_region(id, Some(date(8, 20)))
        .await
        .unwrap();
    let second = calculator
        .calculate_for_region(id, Some(date(8, 20)))
        .await
        .unwrap();

    assert_eq!(first.score, second.score);
    assert_eq!(first.level, second.level);
    assert_eq!(store.risk_records().await.len(), 1);

    // A new observation changes the stored value for the same key.
    store
        .insert_observation(EnvironmentalObservation::new(id, date(8, 19)))
        .await;
    let third = calculator
        .calculate_for_region(id, Some(date(8, 20)))
        .await
        .unwrap();
    let records = store.risk_records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, third.score);
    assert!(third.score < first.score);
}

#[tokio::test]
async fn test_missing_environmental_data() {
    let (store, calculator) = setup();
    let region = Region::new("Etung").with_coverage(40.0, 35.0);
    let id = region.id;
    store.insert_region(region).await;
    store
        .insert_case_report(CaseReport {
            region_id: id,
            report_date: date(8, 15),
            new_cases: 20,
            deaths: 0,
        })
        .await;

    let result = calculator.calculate_for_region(id, None).await.unwrap();

    assert_eq!(result.components.flood, 0.0);
    assert_eq!(result.components.rainfall, 0.0);
    assert_eq!(result.components.cases, 0.4);
    assert_eq!(result.components.vulnerability, 0.625);
    assert_eq!(result.raw_values.ndwi, None);
    assert_eq!(result.raw_values.rainfall_7day_mm, None);
    assert_eq!(result.level, RiskLevel::Green);
    assert_eq!(result.notes.as_deref(), Some("no environmental observation"));
}

#[tokio::test]
async fn test_unknown_region_is_not_found() {
    let (_store, calculator) = setup();
    let missing = Uuid::new_v4();

    let err = calculator
        .calculate_for_region(missing, Some(date(8, 20)))
        .await
        .unwrap_err();

    assert!(matches!(err, RiskError::RegionNotFound(id) if id == missing));
}

#[tokio::test]
async fn test_persistence_failure_propagates() {
    let (store, calculator) = setup();
    let id = seed_flooded_region(&store, "Biase").await;
    store.fail_writes_for(id).await;

    let err = calculator
        .calculate_for_region(id, Some(date(8, 20)))
        .await
        .unwrap_err();

    assert!(matches!(err, RiskError::Persistence(_)));
    assert!(store.risk_records().await.is_empty());
}

#[tokio::test]
async fn test_calculate_all_isolates_failures() {
    let (store, calculator) = setup();
    let healthy = seed_flooded_region(&store, "Abi").await;

    let corrupt = Region::new("Obanliku");
    let corrupt_id = corrupt.id;
    store.insert_region(corrupt).await;
    store
        .insert_observation(
            EnvironmentalObservation::new(corrupt_id, date(8, 18))
                .with_flood(Some(f64::NAN), Some(5.0)),
        )
        .await;

    let unwritable = seed_flooded_region(&store, "Obudu").await;
    store.fail_writes_for(unwritable).await;

    let quiet = Region::new("Bekwarra").with_coverage(90.0, 90.0);
    let quiet_id = quiet.id;
    store.insert_region(quiet).await;

    let entries = calculator.calculate_all(Some(date(8, 20))).await.unwrap();

    assert_eq!(entries.len(), 4);
    let ids: Vec<Uuid> = entries.iter().map(BatchEntry::region_id).collect();
    assert_eq!(ids, vec![healthy, corrupt_id, unwritable, quiet_id]);

    match &entries[1] {
        BatchEntry::Failed(failure) => {
            assert_eq!(failure.region_name, "Obanliku");
            assert!(failure.error.contains("Computation error"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    match &entries[2] {
        BatchEntry::Failed(failure) => assert!(failure.error.contains("Persistence error")),
        other => panic!("expected failure, got {:?}", other),
    }

    let summary = BatchSummary::from_entries(&entries);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.red, 1);
    assert_eq!(summary.green, 1);
    assert_eq!(summary.scored(), 2);

    let records = store.risk_records().await;
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.score_date == date(8, 20)));
}

#[tokio::test]
async fn test_case_window_ignores_score_date() {
    let (store, calculator) = setup();
    let id = seed_flooded_region(&store, "Akpabuyo").await;

    let past = calculator
        .calculate_for_region(id, Some(date(6, 1)))
        .await
        .unwrap();
    let current = calculator
        .calculate_for_region(id, Some(date(8, 20)))
        .await
        .unwrap();

    assert_eq!(past.raw_values.recent_cases, current.raw_values.recent_cases);
    assert_eq!(past.score, current.score);
    assert_eq!(store.risk_records().await.len(), 2);
}

#[tokio::test]
async fn test_latest_and_history_views() {
    let (store, calculator) = setup();
    let id = seed_flooded_region(&store, "Ogoja").await;
    let other = seed_flooded_region(&store, "Yala").await;

    for day in [10, 11, 12] {
        calculator
            .calculate_for_region(id, Some(date(8, day)))
            .await
            .unwrap();
    }
    calculator
        .calculate_for_region(other, Some(date(8, 5)))
        .await
        .unwrap();

    let latest = store.latest_per_region().await.unwrap();
    assert_eq!(latest.len(), 2);
    let for_id = latest.iter().find(|r| r.region_id == id).unwrap();
    assert_eq!(for_id.score_date, date(8, 12));

    let history = store.history(id, date(8, 11)).await.unwrap();
    let dates: Vec<NaiveDate> = history.iter().map(|r| r.score_date).collect();
    assert_eq!(dates, vec![date(8, 11), date(8, 12)]);

    let trend = summarize_history(&history);
    assert_eq!(trend.current_level, "red");
    assert_eq!(trend.avg_score, 0.825);
}

/// Accepts reads but reports every write as unreadable.
struct CorruptingRiskStore;

#[async_trait]
impl RiskStore for CorruptingRiskStore {
    async fn upsert(&self, _record: &RiskRecord) -> Result<RiskRecord, StoreError> {
        Err(StoreError::Corrupt("stored level is not a risk level".to_string()))
    }

    async fn latest_per_region(&self) -> Result<Vec<RiskRecord>, StoreError> {
        Ok(Vec::new())
    }

    async fn history(
        &self,
        _region_id: Uuid,
        _since: NaiveDate,
    ) -> Result<Vec<RiskRecord>, StoreError> {
        Ok(Vec::new())
    }
}

/// Lists an extra region that cannot be fetched by id.
struct GhostRegionStore {
    inner: Arc<InMemoryStore>,
    ghost: Region,
}

#[async_trait]
impl RegionStore for GhostRegionStore {
    async fn get_region(&self, id: Uuid) -> Result<Option<Region>, StoreError> {
        self.inner.get_region(id).await
    }

    async fn list_regions(&self) -> Result<Vec<Region>, StoreError> {
        let mut regions = self.inner.list_regions().await?;
        regions.push(self.ghost.clone());
        Ok(regions)
    }
}

#[tokio::test]
async fn test_corrupt_upsert_is_a_computation_error() {
    let store = Arc::new(InMemoryStore::new(date(8, 20)));
    let id = seed_flooded_region(&store, "Akpabuyo").await;
    let stores = Stores {
        risks: Arc::new(CorruptingRiskStore),
        ..Stores::from_backend(store.clone())
    };
    let calculator = RiskCalculator::new(stores, ScoringConfig::default());

    let err = calculator
        .calculate_for_region(id, Some(date(8, 20)))
        .await
        .unwrap_err();

    assert!(matches!(err, RiskError::Computation(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_region_vanishing_mid_batch_is_recorded() {
    let store = Arc::new(InMemoryStore::new(date(8, 20)));
    seed_flooded_region(&store, "Odukpani").await;
    let ghost = Region::new("Ghost");
    let ghost_id = ghost.id;
    let stores = Stores {
        regions: Arc::new(GhostRegionStore {
            inner: store.clone(),
            ghost,
        }),
        ..Stores::from_backend(store.clone())
    };
    let calculator = RiskCalculator::new(stores, ScoringConfig::default());

    let entries = calculator.calculate_all(Some(date(8, 20))).await.unwrap();

    assert_eq!(entries.len(), 2);
    let failure = entries
        .iter()
        .find_map(|e| match e {
            BatchEntry::Failed(f) => Some(f),
            _ => None,
        })
        .unwrap();
    assert_eq!(failure.region_id, ghost_id);
    assert_eq!(failure.region_name, "Ghost");
    assert!(failure.error.contains("not found"));
    assert_eq!(store.risk_records().await.len(), 1);
}

#[test]
fn test_calculator_exposes_its_config() {
    let (_store, calculator) = setup();
    assert_eq!(calculator.config().algorithm_version, "1.0");
}
