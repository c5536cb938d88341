//! Guided estimate intake: the question template, visibility rules, step
//! completion, derived answers, and the service facade over the repository
//! boundary. Every engine operation is a pure transform from one answer
//! snapshot to the next; the service is the only place a snapshot is
//! committed.

pub mod blueprint;
pub mod completion;
pub mod derived;
pub mod domain;
pub mod import;
pub mod question;
pub mod repository;
pub mod router;
pub mod service;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use blueprint::{EstimateTemplate, QuestionStep, StepKind, ROOF_TYPE};
pub use completion::{can_generate, completion_percent, is_step_complete};
pub use derived::{apply_derived_updates, SUPPORT_BEARING_M};
pub use domain::{
    AnswerMap, AnswerSource, AnswerValue, DimensionValues, EstimateId, EstimateStatus,
    MeasurementValues, Scalar, DIMENSIONS_KEY, MEASUREMENTS_KEY,
};
pub use import::{import_legacy_answers, LegacyImport, LegacyImportError};
pub use question::{
    Dependency, DependencyCondition, DependencyValue, Question, QuestionControl, QuestionOption,
    VisibilityRule,
};
pub use repository::{
    EstimateRecord, EstimateRepository, EstimateStatusView, RepositoryError,
};
pub use router::estimate_router;
pub use service::{
    measurement_inputs, AnswerSubmission, EstimateIntakeService, EstimateProgressView,
    IntakeServiceError, NewEstimateRequest, StepProgress,
};
pub use visibility::is_visible;
