use std::convert::Infallible;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The proxy endpoint does not use this type: its failure body is a bare
/// `{"error": message}` that callers already depend on.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<Infallible> for AppError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Session(e @ SessionError::MissingInput) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Session(e @ SessionError::AlreadyLoading) => {
                (StatusCode::CONFLICT, "MATCH_IN_PROGRESS", e.to_string())
            }
            AppError::Session(e @ SessionError::SkillGapOutOfRange { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
            }
            AppError::InvalidBody(rejection) => {
                (rejection.status(), "INVALID_BODY", rejection.body_text())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
