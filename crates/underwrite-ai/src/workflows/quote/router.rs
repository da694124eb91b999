use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{Session, SessionId};
use super::repository::SessionRepository;
use super::service::{AnswerBatch, QuoteServiceError, QuoteSessionService};

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub subject_id: Option<String>,
}

/// Router exposing the quote session lifecycle.
pub fn quote_router<R>(service: Arc<QuoteSessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/quote/sessions",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/api/v1/quote/sessions/:session_id",
            get(get_handler::<R>)
                .put(save_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/quote/sessions/:session_id/answers",
            post(answers_handler::<R>),
        )
        .route(
            "/api/v1/quote/sessions/:session_id/questionnaire",
            get(questionnaire_handler::<R>),
        )
        .route(
            "/api/v1/quote/sessions/:session_id/eligibility",
            get(eligibility_handler::<R>),
        )
        .route(
            "/api/v1/quote/sessions/:session_id/recommendations",
            get(recommendations_handler::<R>),
        )
        .route(
            "/api/v1/quote/sessions/:session_id/complete",
            post(complete_handler::<R>),
        )
        .route(
            "/api/v1/quote/sessions/:session_id/abandon",
            post(abandon_handler::<R>),
        )
        .with_state(service)
}

fn error_response(error: QuoteServiceError) -> Response {
    match error {
        QuoteServiceError::NotFound(id) => {
            let payload = json!({
                "error": format!("quote session {id} not found"),
                "session_id": id,
                "action": "start_new_session",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        QuoteServiceError::Closed { id, status } => {
            let payload = json!({
                "error": format!("quote session {id} is {status}"),
                "session_id": id,
                "status": status,
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        QuoteServiceError::Incomplete { id, issues } => {
            let payload = json!({
                "error": "questionnaire incomplete",
                "session_id": id,
                "issues": issues,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        QuoteServiceError::Repository(error) => {
            warn!(%error, "quote session store unavailable");
            let payload = json!({
                "error": error.to_string(),
                "persisted": false,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    request: Option<Json<CreateSessionRequest>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let request = request.map(|Json(request)| request).unwrap_or_default();
    match service.create_session(request.subject_id) {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<QuoteSessionService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    match service.list_sessions() {
        Ok(sessions) => (StatusCode::OK, Json(sessions)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get_session(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
    Json(session): Json<Session>,
) -> Response
where
    R: SessionRepository + 'static,
{
    if session.id.0 != session_id {
        let payload = json!({
            "error": "session id in the body does not match the path",
            "session_id": session_id,
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    match service.save_session(&session) {
        Ok(()) => {
            let payload = json!({ "session_id": session.id, "persisted": true });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.delete_session(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answers_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
    Json(batch): Json<AnswerBatch>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.submit_answers(&SessionId(session_id), batch) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn questionnaire_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.render_questionnaire(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get_session(&SessionId(session_id)) {
        Ok(session) => {
            let analysis = service.analyze_eligibility(&session);
            (StatusCode::OK, Json(analysis)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get_session(&SessionId(session_id)) {
        Ok(session) => {
            let recommendations = service.generate_ai_recommendations(&session);
            (StatusCode::OK, Json(recommendations)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.complete(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn abandon_handler<R>(
    State(service): State<Arc<QuoteSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.abandon(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(error) => error_response(error),
    }
}
