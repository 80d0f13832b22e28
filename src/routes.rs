// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{attempts, not_found, review},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (review, users).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Skipping invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    // Stateless: the caller supplies the history.
    let review_routes = Router::new()
        .route("/queue", post(review::build_review_queue))
        .route("/topics", post(review::topic_accuracy));

    let user_routes = Router::new()
        .route("/{user_id}/attempts", post(attempts::record_attempt))
        .route("/{user_id}/performances", get(attempts::list_performances))
        .route("/{user_id}/review-queue", get(attempts::user_review_queue))
        .route("/{user_id}/topics", get(attempts::user_topic_accuracy));

    Router::new()
        .nest("/api/review", review_routes)
        .nest("/api/users", user_routes)
        .fallback(not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
