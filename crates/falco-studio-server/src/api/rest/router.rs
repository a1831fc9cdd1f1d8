//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use falco_studio_llm::RuleStudio;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Create REST API router
///
/// When `static_dir` is given, `/` serves its `index.html` and `/static/*`
/// serves the rest of the directory.
pub fn create_router(studio: Arc<RuleStudio>, static_dir: Option<&Path>) -> Router {
    let state = AppState { studio };

    let mut router = Router::new()
        .route("/api/health", get(health))
        .route("/api/examples", get(examples))
        .route("/api/generate", post(generate))
        .route("/api/explain", post(explain))
        .route("/api/validate", post(validate))
        .route("/api/optimize", post(optimize))
        .route("/api/chat", post(chat))
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
