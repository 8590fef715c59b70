pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::proxy::handle_proxy;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Prompt proxy
        .route("/api/v1/gemini", post(handle_proxy))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/match", post(handlers::handle_match))
        .route(
            "/api/v1/sessions/:id/skill-gaps/:index/submit",
            post(handlers::handle_simulate_submission),
        )
        .route(
            "/api/v1/sessions/:id/download",
            get(handlers::handle_download),
        )
        .with_state(state)
}
