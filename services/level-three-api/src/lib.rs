//! Level 3 API Service Library
//!
//! HTTP service that renders regions and full-grid previews of TEMPO NO2
//! Level 3 datasets as PNG images with value statistics.

pub mod config;
pub mod handlers;
pub mod retrieval;
pub mod scheduler;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health::root_handler))
        .route("/health", get(handlers::health::health_handler))
        // Level 3 retrieval
        .route(
            "/api/level-three/retrieve",
            get(handlers::level_three::retrieve_handler),
        )
        .route(
            "/api/level-three/retrieve-latest",
            get(handlers::level_three::retrieve_latest_handler),
        )
        .route(
            "/api/level-three/full",
            get(handlers::level_three::full_handler),
        )
        .route(
            "/api/level-three/full-latest",
            get(handlers::level_three::full_latest_handler),
        )
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
