use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use buildquote::workflows::estimate::{estimate_router, EstimateIntakeService, EstimateRepository};
use buildquote::workflows::measurement::{
    compute_measurements, EstimateMeasurements, MeasurementInputs,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_estimate_routes<R>(service: Arc<EstimateIntakeService<R>>) -> axum::Router
where
    R: EstimateRepository + 'static,
{
    estimate_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/measurements",
            axum::routing::post(measurements_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless take-off for the display layer: raw dimensions in, derived
/// quantities out. Missing fields fall back to the documented defaults.
pub(crate) async fn measurements_endpoint(
    Json(inputs): Json<MeasurementInputs>,
) -> Json<EstimateMeasurements> {
    Json(compute_measurements(&inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildquote::workflows::measurement::RoofType;

    #[tokio::test]
    async fn measurements_endpoint_computes_the_flat_roof_example() {
        let inputs = MeasurementInputs {
            external_length_m: 6.0,
            external_width_m: 4.0,
            eaves_height_m: 2.4,
            roof_type: Some(RoofType::Flat),
            ..MeasurementInputs::default()
        };

        let Json(measurements) = measurements_endpoint(Json(inputs)).await;

        assert_eq!(measurements.floor_area_m2, 24.0);
        assert_eq!(measurements.perimeter_m, 20.0);
        assert_eq!(measurements.external_wall_area_m2, 48.0);
        assert_eq!(measurements.roof_area_m2, 28.16);
    }

    #[tokio::test]
    async fn measurements_endpoint_applies_pitched_factor() {
        let inputs = MeasurementInputs {
            external_length_m: 6.0,
            external_width_m: 4.0,
            eaves_height_m: 2.4,
            roof_type: Some(RoofType::Pitched),
            ..MeasurementInputs::default()
        };

        let Json(measurements) = measurements_endpoint(Json(inputs)).await;

        assert_eq!(measurements.roof_area_m2, 32.38);
        assert_eq!(measurements.bargeboard_length_m, 12.0);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(payload) = healthcheck().await;
        assert_eq!(payload.get("status"), Some(&json!("ok")));
    }
}
