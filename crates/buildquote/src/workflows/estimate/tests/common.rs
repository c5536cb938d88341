use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::estimate::blueprint::EstimateTemplate;
use crate::workflows::estimate::domain::{
    AnswerMap, AnswerValue, DimensionValues, EstimateId, MeasurementValues, DIMENSIONS_KEY,
    MEASUREMENTS_KEY,
};
use crate::workflows::estimate::repository::{
    EstimateRecord, EstimateRepository, RepositoryError,
};
use crate::workflows::estimate::service::{AnswerSubmission, EstimateIntakeService};

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<EstimateId, EstimateRecord>>>,
}

impl EstimateRepository for MemoryRepository {
    fn insert(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.estimate_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.estimate_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EstimateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        guard.insert(record.estimate_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &EstimateId) -> Result<Option<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.get(id).cloned())
    }

    fn open_estimates(&self, limit: usize) -> Result<Vec<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

pub(super) fn template() -> EstimateTemplate {
    EstimateTemplate::standard()
}

pub(super) fn build_service() -> (
    EstimateIntakeService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EstimateIntakeService::new(repository.clone());
    (service, repository)
}

pub(super) fn answers_with(pairs: Vec<(&str, AnswerValue)>) -> AnswerMap {
    let mut answers = AnswerMap::new();
    for (key, value) in pairs {
        answers.insert_manual(key, value);
    }
    answers
}

pub(super) fn dimensions_block(length_m: f64, width_m: f64) -> AnswerValue {
    AnswerValue::Dimensions(DimensionValues { length_m, width_m })
}

pub(super) fn measurements_block(
    external_length_m: f64,
    external_width_m: f64,
    floor_area_m2: f64,
    eaves_height_m: f64,
) -> AnswerValue {
    AnswerValue::Measurements(MeasurementValues {
        external_length_m,
        external_width_m,
        floor_area_m2,
        eaves_height_m,
        ceiling_height_m: None,
    })
}

/// The shortest answer script that completes every step of the standard
/// template: no structural openings, flat roof, radiator heating.
pub(super) fn minimum_complete_script() -> Vec<(&'static str, AnswerValue)> {
    vec![
        ("project_type", AnswerValue::scalar("single_storey_extension")),
        ("property_age", AnswerValue::scalar("modern")),
        ("roof_type", AnswerValue::scalar("flat")),
        ("flat_roof_finish", AnswerValue::scalar("grp")),
        ("wall_construction", AnswerValue::scalar("cavity")),
        ("external_finish", AnswerValue::many(["facing_brick"])),
        ("new_opening", AnswerValue::scalar(false)),
        ("existing_opening", AnswerValue::scalar(false)),
        ("internal_finish", AnswerValue::many(["plaster_skim"])),
        ("heating_changes", AnswerValue::many(["radiators"])),
        (DIMENSIONS_KEY, dimensions_block(3.0, 5.0)),
        (MEASUREMENTS_KEY, measurements_block(6.0, 4.0, 24.0, 2.4)),
    ]
}

pub(super) fn submit_script(
    service: &EstimateIntakeService<MemoryRepository>,
    estimate_id: &EstimateId,
    script: Vec<(&'static str, AnswerValue)>,
) {
    for (key, value) in script {
        service
            .record_answer(
                estimate_id,
                AnswerSubmission {
                    key: key.to_string(),
                    value,
                },
            )
            .expect("answer accepted");
    }
}
