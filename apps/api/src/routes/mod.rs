pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV ingestion
        .route("/api/v1/cv", post(extraction::handle_parse_cv))
        // Recommendation queries
        .route(
            "/api/v1/recommendations/jobs",
            post(matching::handle_recommend_jobs),
        )
        .route(
            "/api/v1/recommendations/candidates",
            post(matching::handle_recommend_candidates),
        )
        .route(
            "/api/v1/candidates/search",
            post(matching::handle_search_candidates),
        )
        .with_state(state)
}
