//! HTTP routes for the web front-end.

mod api;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower_http::{cors::CorsLayer, services::ServeDir};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Determine static file directory
    let static_dir = std::env::var("KGASSIST_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"));

    Router::new()
        .route("/api/documents", get(api::get_documents))
        .route("/api/query", post(api::query))
        .route("/api/graph/:document", get(api::get_graph))
        // Static files (serve index.html as fallback)
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
