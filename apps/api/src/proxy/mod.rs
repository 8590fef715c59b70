//! Prompt proxy — forwards a caller's prompt to the LLM with the server-held
//! key so the browser never sees it.
//!
//! Contract: 200 + JSON string of the reply text, 200 + `"Invalid response"`
//! when the reply has no text, 500 + `{"error": message}` when the call fails.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::llm_client::ResponseFormat;
use crate::state::AppState;

pub const INVALID_RESPONSE: &str = "Invalid response";

#[derive(Debug, Default, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub prompt: String,
}

impl ProxyRequest {
    /// A body that is missing or not valid JSON is treated as `{}`.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// POST /api/v1/gemini
pub async fn handle_proxy(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let request = ProxyRequest::from_body(&body);
    debug!("Proxying prompt ({} bytes)", request.prompt.len());

    match state.llm.generate(&request.prompt, &ResponseFormat::Text).await {
        Ok(Some(text)) => (StatusCode::OK, Json(json!(text))),
        Ok(None) => (StatusCode::OK, Json(json!(INVALID_RESPONSE))),
        Err(e) => {
            error!("Proxy call failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}
