mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod proxy;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Matcher API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; upstream calls will be rejected");
    }

    let llm = GeminiClient::from_config(&config)?;
    info!(
        "LLM client initialized (model: {}, structured output: {})",
        llm.model(),
        config.structured_output
    );

    let state = AppState {
        llm: Arc::new(llm),
        sessions: SessionStore::new(),
        config: config.clone(),
    };

    // The browser front-end is served from another origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
