use crate::cli::ServeArgs;
use crate::infra::{AppState, SessionBackend};
use crate::routes::with_workflow_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use underwrite_ai::config::AppConfig;
use underwrite_ai::error::AppError;
use underwrite_ai::telemetry;
use underwrite_ai::workflows::derogation::DerogationAdvisor;
use underwrite_ai::workflows::quote::{EligibilityConfig, QuoteSessionService};

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

    let backend = SessionBackend::from_dir(config.store.session_dir.as_deref())?;
    let store_kind = backend.label();
    let quote_service = Arc::new(QuoteSessionService::new(
        Arc::new(backend),
        EligibilityConfig::default(),
    ));
    let advisor = Arc::new(DerogationAdvisor::default());

    let app = with_workflow_routes(quote_service, advisor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, session_store = store_kind, "underwriting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
