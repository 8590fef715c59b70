//! Axum route handlers for the Session API.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::parser::MatchOutcome;
use crate::matching::workflow::{run_match, MatchReport};
use crate::session::store::Session;
use crate::session::{
    begin_match, complete_match, download, set_inputs, simulate_submission,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub cv_text: String,
    pub jd_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> (StatusCode, Json<Session>) {
    let session = state.sessions.create().await;
    info!("Session {} created", session.id);
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/match
///
/// Stores the inputs, runs both AI calls and returns the finished session.
/// A second request while one is in flight gets 409. A body that is not a
/// valid `MatchRequest` gets the usual error envelope with `INVALID_BODY`.
///
/// The workflow runs on its own task and writes its result back itself, so
/// `loading` clears even if this request is dropped mid-flight.
pub async fn handle_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<Session>, AppError> {
    let Json(request) = payload?;
    let session = state
        .sessions
        .update(id, |s| {
            begin_match(&set_inputs(s, request.cv_text, request.jd_text))
        })
        .await?;

    let llm = state.llm.clone();
    let sessions = state.sessions.clone();
    let structured_output = state.config.structured_output;
    let cv_text = session.state.cv_text;
    let jd_text = session.state.jd_text;

    let task = tokio::spawn(async move {
        let report = run_match(llm.as_ref(), &cv_text, &jd_text, structured_output).await;
        sessions
            .update(id, |s| Ok::<_, Infallible>(complete_match(s, report)))
            .await
    });

    let session = match task.await {
        Ok(result) => result?,
        Err(e) => {
            error!("Match workflow for session {id} aborted: {e}");
            let failed = MatchReport {
                outcome: MatchOutcome::ParseFailure,
                skill_gaps: Vec::new(),
            };
            state
                .sessions
                .update(id, |s| Ok::<_, Infallible>(complete_match(s, failed)))
                .await?
        }
    };

    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/skill-gaps/:index/submit
pub async fn handle_simulate_submission(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<Session>, AppError> {
    let session = state
        .sessions
        .update(id, |s| simulate_submission(s, index))
        .await?;
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id/download
///
/// The optimized CV as a plain-text attachment, byte for byte.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let session = state.sessions.get(id).await?;
    let file = download(&session.state).ok_or_else(|| {
        AppError::NotFound(format!("Session {id} has no optimized CV yet"))
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        )
        .body(Body::from(file.contents))
        .map_err(|e| AppError::Internal(e.into()))
}
