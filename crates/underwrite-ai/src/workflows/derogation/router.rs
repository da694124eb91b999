use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::domain::{Requirement, Situation};
use super::service::DerogationAdvisor;

/// Situation plus the requirement it falls short of.
#[derive(Debug, Clone, Deserialize)]
pub struct DerogationRequest {
    pub situation: Situation,
    pub requirement: Requirement,
}

/// Router exposing the catalog and the advisory pipeline.
pub fn derogation_router(advisor: Arc<DerogationAdvisor>) -> Router {
    Router::new()
        .route("/api/v1/derogation/scenarios", get(scenarios_handler))
        .route("/api/v1/derogation/counterparties", get(counterparties_handler))
        .route("/api/v1/derogation/analysis", post(analysis_handler))
        .route("/api/v1/derogation/proposals", post(proposals_handler))
        .route("/api/v1/derogation/similar-cases", post(similar_cases_handler))
        .with_state(advisor)
}

pub(crate) async fn scenarios_handler(State(advisor): State<Arc<DerogationAdvisor>>) -> Response {
    (StatusCode::OK, Json(advisor.catalog().scenarios())).into_response()
}

pub(crate) async fn counterparties_handler(
    State(advisor): State<Arc<DerogationAdvisor>>,
) -> Response {
    (StatusCode::OK, Json(advisor.catalog().profiles())).into_response()
}

pub(crate) async fn analysis_handler(
    State(advisor): State<Arc<DerogationAdvisor>>,
    Json(request): Json<DerogationRequest>,
) -> Response {
    let analysis = advisor.analyze_situation(&request.situation, &request.requirement);
    (StatusCode::OK, Json(analysis)).into_response()
}

pub(crate) async fn proposals_handler(
    State(advisor): State<Arc<DerogationAdvisor>>,
    Json(request): Json<DerogationRequest>,
) -> Response {
    let report = advisor.advise(&request.situation, &request.requirement);
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn similar_cases_handler(
    State(advisor): State<Arc<DerogationAdvisor>>,
    Json(request): Json<DerogationRequest>,
) -> Response {
    let cases = advisor.find_similar_cases(&request.situation, &request.requirement);
    (StatusCode::OK, Json(cases)).into_response()
}
