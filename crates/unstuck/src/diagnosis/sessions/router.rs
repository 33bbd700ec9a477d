use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::repository::{PromptSink, SessionId, SessionStore, StoreError};
use super::service::{DiagnosisService, DiagnosisServiceError};
use crate::diagnosis::session::{SessionAction, SessionError};

/// Router builder exposing the session lifecycle over HTTP.
pub fn diagnosis_router<S, P>(service: Arc<DiagnosisService<S, P>>) -> Router
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(start_handler::<S, P>))
        .route(
            "/api/v1/sessions/:session_id",
            get(status_handler::<S, P>).delete(discard_handler::<S, P>),
        )
        .route(
            "/api/v1/sessions/:session_id/actions",
            post(action_handler::<S, P>),
        )
        .route(
            "/api/v1/sessions/:session_id/report",
            get(report_handler::<S, P>),
        )
        .route(
            "/api/v1/sessions/:session_id/copy",
            post(copy_handler::<S, P>),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<S, P>(
    State(service): State<Arc<DiagnosisService<S, P>>>,
) -> Response
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    match service.start() {
        Ok(record) => (StatusCode::CREATED, Json(service.view(&record))).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn status_handler<S, P>(
    State(service): State<Arc<DiagnosisService<S, P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, Json(service.view(&record))).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn action_handler<S, P>(
    State(service): State<Arc<DiagnosisService<S, P>>>,
    Path(session_id): Path<String>,
    Json(action): Json<SessionAction>,
) -> Response
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    match service.apply(&SessionId(session_id), action) {
        Ok(record) => (StatusCode::OK, Json(service.view(&record))).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn report_handler<S, P>(
    State(service): State<Arc<DiagnosisService<S, P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    match service.report(&SessionId(session_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn copy_handler<S, P>(
    State(service): State<Arc<DiagnosisService<S, P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    match service.copy_prompt(&SessionId(session_id)) {
        Ok(notice) => (StatusCode::OK, Json(notice)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn discard_handler<S, P>(
    State(service): State<Arc<DiagnosisService<S, P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    match service.discard(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &DiagnosisServiceError) -> Response {
    let status = match err {
        DiagnosisServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        DiagnosisServiceError::Store(StoreError::Conflict)
        | DiagnosisServiceError::Session(SessionError::UnexpectedAction { .. })
        | DiagnosisServiceError::Session(SessionError::NotFinished { .. }) => StatusCode::CONFLICT,
        DiagnosisServiceError::Store(StoreError::Unavailable(_))
        | DiagnosisServiceError::Session(SessionError::UnknownQuestion(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
