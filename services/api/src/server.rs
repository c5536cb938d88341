use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEstimateRepository};
use crate::routes::with_estimate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use buildquote::config::AppConfig;
use buildquote::error::AppError;
use buildquote::telemetry;
use buildquote::workflows::estimate::EstimateIntakeService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryEstimateRepository::default());
    let intake_service = Arc::new(EstimateIntakeService::new(repository));

    let app = with_estimate_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "estimate intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
