use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AnswerMap, EstimateId, EstimateStatus};

/// Repository record holding the answer snapshot and status metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub estimate_id: EstimateId,
    pub site_reference: String,
    pub created_on: NaiveDate,
    pub status: EstimateStatus,
    pub answers: AnswerMap,
}

impl EstimateRecord {
    pub fn status_view(&self, completion_percent: u8, can_generate: bool) -> EstimateStatusView {
        EstimateStatusView {
            estimate_id: self.estimate_id.clone(),
            site_reference: self.site_reference.clone(),
            status: self.status.label(),
            completion_percent,
            can_generate,
        }
    }
}

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait EstimateRepository: Send + Sync {
    fn insert(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError>;
    fn update(&self, record: EstimateRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EstimateId) -> Result<Option<EstimateRecord>, RepositoryError>;
    fn open_estimates(&self, limit: usize) -> Result<Vec<EstimateRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("estimate already exists")]
    Conflict,
    #[error("estimate not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an estimate's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateStatusView {
    pub estimate_id: EstimateId,
    pub site_reference: String,
    pub status: &'static str,
    pub completion_percent: u8,
    pub can_generate: bool,
}
