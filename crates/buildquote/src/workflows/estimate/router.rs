use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EstimateId, EstimateStatus};
use super::repository::{EstimateRepository, RepositoryError};
use super::service::{
    AnswerSubmission, EstimateIntakeService, IntakeServiceError, NewEstimateRequest,
};

/// Router builder exposing HTTP endpoints for estimate intake.
pub fn estimate_router<R>(service: Arc<EstimateIntakeService<R>>) -> Router
where
    R: EstimateRepository + 'static,
{
    Router::new()
        .route("/api/v1/estimates", post(open_handler::<R>))
        .route("/api/v1/estimates/:estimate_id", get(status_handler::<R>))
        .route(
            "/api/v1/estimates/:estimate_id/answers",
            post(answer_handler::<R>),
        )
        .route(
            "/api/v1/estimates/:estimate_id/import",
            post(import_handler::<R>),
        )
        .route(
            "/api/v1/estimates/:estimate_id/measurements",
            get(measurements_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyImportRequest {
    pub(crate) csv: String,
}

pub(crate) async fn open_handler<R>(
    State(service): State<Arc<EstimateIntakeService<R>>>,
    axum::Json(request): axum::Json<NewEstimateRequest>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    match service
        .open(request)
        .and_then(|record| service.status(&record.estimate_id))
    {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<EstimateIntakeService<R>>>,
    Path(estimate_id): Path<String>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let id = EstimateId(estimate_id);
    match service.status(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "estimate_id": id.0,
                "status": EstimateStatus::Draft.label(),
                "completion_percent": 0,
                "can_generate": false,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn answer_handler<R>(
    State(service): State<Arc<EstimateIntakeService<R>>>,
    Path(estimate_id): Path<String>,
    axum::Json(submission): axum::Json<AnswerSubmission>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let id = EstimateId(estimate_id);
    match service.record_answer(&id, submission) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(IntakeServiceError::UnknownAnswerKey(key)) => {
            let payload = json!({
                "error": format!("unknown answer key: {key}"),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<EstimateIntakeService<R>>>,
    Path(estimate_id): Path<String>,
    axum::Json(request): axum::Json<LegacyImportRequest>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let id = EstimateId(estimate_id);
    let reader = Cursor::new(request.csv.into_bytes());
    match service.import_legacy(&id, reader) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(IntakeServiceError::Import(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn measurements_handler<R>(
    State(service): State<Arc<EstimateIntakeService<R>>>,
    Path(estimate_id): Path<String>,
) -> Response
where
    R: EstimateRepository + 'static,
{
    let id = EstimateId(estimate_id);
    match service.measurements(&id) {
        Ok(measurements) => (StatusCode::OK, axum::Json(measurements)).into_response(),
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

fn not_found(id: &EstimateId) -> Response {
    let payload = json!({
        "error": format!("estimate {} not found", id.0),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: IntakeServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
