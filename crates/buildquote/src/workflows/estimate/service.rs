use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::blueprint::{EstimateTemplate, ROOF_TYPE};
use super::completion::{can_generate, completion_percent, is_step_complete};
use super::derived::apply_derived_updates;
use super::domain::{
    AnswerMap, AnswerValue, EstimateId, EstimateStatus, Scalar, DIMENSIONS_KEY, MEASUREMENTS_KEY,
};
use super::import::{import_legacy_answers, LegacyImportError};
use super::repository::{EstimateRecord, EstimateRepository, EstimateStatusView, RepositoryError};
use super::visibility::is_visible;
use crate::workflows::measurement::{
    compute_measurements, EstimateMeasurements, MeasurementInputs, RoofType,
};

/// Service composing the template, form engine, and repository boundary.
pub struct EstimateIntakeService<R> {
    template: EstimateTemplate,
    repository: Arc<R>,
}

static ESTIMATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_estimate_id() -> EstimateId {
    let id = ESTIMATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EstimateId(format!("est-{id:06}"))
}

/// Request payload opening a fresh estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEstimateRequest {
    pub site_reference: String,
    #[serde(default)]
    pub created_on: Option<NaiveDate>,
}

/// One answer change, as submitted by the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub key: String,
    pub value: AnswerValue,
}

/// Per-step progress exposed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct StepProgress {
    pub step_id: String,
    pub title: String,
    pub complete: bool,
    pub visible_questions: Vec<String>,
}

/// Progress snapshot returned after every committed answer change.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateProgressView {
    pub estimate_id: EstimateId,
    pub status: &'static str,
    pub completion_percent: u8,
    pub can_generate: bool,
    pub steps: Vec<StepProgress>,
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error("unknown answer key: {0}")]
    UnknownAnswerKey(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Import(#[from] LegacyImportError),
}

impl<R> EstimateIntakeService<R>
where
    R: EstimateRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_template(EstimateTemplate::standard(), repository)
    }

    pub fn with_template(template: EstimateTemplate, repository: Arc<R>) -> Self {
        Self {
            template,
            repository,
        }
    }

    pub fn template(&self) -> &EstimateTemplate {
        &self.template
    }

    /// Open a new estimate, returning the repository-backed record.
    pub fn open(&self, request: NewEstimateRequest) -> Result<EstimateRecord, IntakeServiceError> {
        let record = EstimateRecord {
            estimate_id: next_estimate_id(),
            site_reference: request.site_reference,
            created_on: request
                .created_on
                .unwrap_or_else(|| Local::now().date_naive()),
            status: EstimateStatus::Draft,
            answers: AnswerMap::new(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Commit one answer change: the value lands with manual provenance,
    /// derived companions are filled in, and the enlarged snapshot replaces
    /// the old one before progress is recomputed.
    pub fn record_answer(
        &self,
        estimate_id: &EstimateId,
        submission: AnswerSubmission,
    ) -> Result<EstimateProgressView, IntakeServiceError> {
        if !self.is_known_key(&submission.key) {
            return Err(IntakeServiceError::UnknownAnswerKey(submission.key));
        }

        let mut record = self
            .repository
            .fetch(estimate_id)?
            .ok_or(RepositoryError::NotFound)?;

        let mut answers = record.answers.clone();
        answers.insert_manual(submission.key.clone(), submission.value);
        record.answers = apply_derived_updates(&submission.key, &answers);
        record.status = self.status_for(&record.answers);

        self.repository.update(record.clone())?;
        Ok(self.progress_view(&record))
    }

    /// Replay a legacy spreadsheet export into the estimate.
    pub fn import_legacy<T: Read>(
        &self,
        estimate_id: &EstimateId,
        reader: T,
    ) -> Result<EstimateProgressView, IntakeServiceError> {
        let import = import_legacy_answers(&self.template, reader)?;

        let mut record = self
            .repository
            .fetch(estimate_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.answers.merge(import.answers);
        record.status = self.status_for(&record.answers);

        self.repository.update(record.clone())?;
        Ok(self.progress_view(&record))
    }

    pub fn get(&self, estimate_id: &EstimateId) -> Result<EstimateRecord, IntakeServiceError> {
        let record = self
            .repository
            .fetch(estimate_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn status(&self, estimate_id: &EstimateId) -> Result<EstimateStatusView, IntakeServiceError> {
        let record = self.get(estimate_id)?;
        Ok(record.status_view(
            completion_percent(&self.template, &record.answers),
            can_generate(&self.template, &record.answers),
        ))
    }

    pub fn progress(
        &self,
        estimate_id: &EstimateId,
    ) -> Result<EstimateProgressView, IntakeServiceError> {
        let record = self.get(estimate_id)?;
        Ok(self.progress_view(&record))
    }

    /// Compute the take-off from the current answers. Total: an estimate
    /// without surveyed measurements yields a zeroed envelope.
    pub fn measurements(
        &self,
        estimate_id: &EstimateId,
    ) -> Result<EstimateMeasurements, IntakeServiceError> {
        let record = self.get(estimate_id)?;
        Ok(compute_measurements(&measurement_inputs(&record.answers)))
    }

    fn is_known_key(&self, key: &str) -> bool {
        key == DIMENSIONS_KEY || key == MEASUREMENTS_KEY || self.template.question(key).is_some()
    }

    fn status_for(&self, answers: &AnswerMap) -> EstimateStatus {
        if can_generate(&self.template, answers) {
            EstimateStatus::ReadyToGenerate
        } else {
            EstimateStatus::InProgress
        }
    }

    fn progress_view(&self, record: &EstimateRecord) -> EstimateProgressView {
        let steps = self
            .template
            .steps()
            .iter()
            .map(|step| StepProgress {
                step_id: step.id.clone(),
                title: step.title.clone(),
                complete: is_step_complete(step, &record.answers),
                visible_questions: step
                    .questions
                    .iter()
                    .filter(|question| is_visible(question, &record.answers))
                    .map(|question| question.id.clone())
                    .collect(),
            })
            .collect();

        EstimateProgressView {
            estimate_id: record.estimate_id.clone(),
            status: record.status.label(),
            completion_percent: completion_percent(&self.template, &record.answers),
            can_generate: can_generate(&self.template, &record.answers),
            steps,
        }
    }
}

/// Assemble calculator inputs from the answer snapshot: the surveyed
/// measurement block plus the roof construction answer; everything else
/// keeps its documented default.
pub fn measurement_inputs(answers: &AnswerMap) -> MeasurementInputs {
    let mut inputs = MeasurementInputs::default();

    if let Some(block) = answers.measurements() {
        inputs.external_length_m = block.external_length_m;
        inputs.external_width_m = block.external_width_m;
        inputs.eaves_height_m = block.eaves_height_m;
        inputs.ceiling_height_m = block.ceiling_height_m;
    }

    inputs.roof_type = match answers.scalar(ROOF_TYPE) {
        Some(Scalar::Text(kind)) if kind.as_str() == "pitched" => Some(RoofType::Pitched),
        Some(Scalar::Text(kind)) if kind.as_str() == "flat" => Some(RoofType::Flat),
        _ => None,
    };

    inputs
}
