use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{FeedbackSubmission, ProfileSubmission};
use super::notes::NotesGenerator;
use super::repository::ProfileStore;
use super::service::{ProfilingService, ProfilingServiceError};

/// Router builder exposing profile intake, history, and feedback endpoints.
pub fn profile_router<S, N>(service: Arc<ProfilingService<S, N>>) -> Router
where
    S: ProfileStore + 'static,
    N: NotesGenerator + 'static,
{
    Router::new()
        .route(
            "/api/v1/profiles",
            get(list_handler::<S, N>).post(submit_handler::<S, N>),
        )
        .route("/api/v1/profiles/feedback", post(feedback_handler::<S, N>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<ProfilingService<S, N>>>,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response
where
    S: ProfileStore + 'static,
    N: NotesGenerator + 'static,
{
    match service.process(submission).await {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<S, N>(
    State(service): State<Arc<ProfilingService<S, N>>>,
) -> Response
where
    S: ProfileStore + 'static,
    N: NotesGenerator + 'static,
{
    match service.list_profiles() {
        Ok(items) => (StatusCode::OK, axum::Json(json!({ "items": items }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn feedback_handler<S, N>(
    State(service): State<Arc<ProfilingService<S, N>>>,
    axum::Json(feedback): axum::Json<FeedbackSubmission>,
) -> Response
where
    S: ProfileStore + 'static,
    N: NotesGenerator + 'static,
{
    match service.record_feedback(feedback) {
        Ok(weights) => {
            (StatusCode::OK, axum::Json(json!({ "ok": true, "weights": weights }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ProfilingServiceError) -> Response {
    let status = match &error {
        ProfilingServiceError::InvalidFeedback(_) => StatusCode::BAD_REQUEST,
        ProfilingServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%error, status = status.as_u16(), "profile request failed");

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
