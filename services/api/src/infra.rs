use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use buildquote::workflows::estimate::{
    EstimateId, EstimateRecord, EstimateRepository, EstimateStatus, RepositoryError,
};
use buildquote::workflows::measurement::RoofType;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEstimateRepository {
    records: Arc<Mutex<HashMap<EstimateId, EstimateRecord>>>,
}

impl EstimateRepository for InMemoryEstimateRepository {
    fn insert(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.estimate_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.estimate_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EstimateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.estimate_id) {
            guard.insert(record.estimate_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &EstimateId) -> Result<Option<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn open_estimates(&self, limit: usize) -> Result<Vec<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status != EstimateStatus::ReadyToGenerate)
            .take(limit)
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_dimension(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a dimension in metres ({err})"))
        .and_then(|value| {
            if value >= 0.0 {
                Ok(value)
            } else {
                Err(format!("dimension '{raw}' must not be negative"))
            }
        })
}

pub(crate) fn parse_roof_type(raw: &str) -> Result<RoofType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "flat" => Ok(RoofType::Flat),
        "pitched" => Ok(RoofType::Pitched),
        other => Err(format!("unknown roof type '{other}', expected flat or pitched")),
    }
}
