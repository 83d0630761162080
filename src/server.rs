use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::llm::gemini::GeminiClient;
use crate::llm::TextCompletion;

pub struct AppState {
    pub config: AppConfig,
    pub llm: Arc<dyn TextCompletion>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        // One client for the process lifetime; stages share it via Arc.
        let llm: Arc<dyn TextCompletion> = Arc::new(GeminiClient::new(&config.gemini));
        Self { config, llm }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/runs", post(crate::workflow::handle_run))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        // The reference frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}
