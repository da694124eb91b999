use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;
use underwrite_ai::workflows::derogation::{derogation_router, DerogationAdvisor};
use underwrite_ai::workflows::quote::{quote_router, QuoteSessionService, SessionRepository};

/// Quote and derogation APIs plus the operational endpoints.
pub(crate) fn with_workflow_routes<R>(
    quotes: Arc<QuoteSessionService<R>>,
    advisor: Arc<DerogationAdvisor>,
) -> Router
where
    R: SessionRepository + 'static,
{
    quote_router(quotes)
        .merge(derogation_router(advisor))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
