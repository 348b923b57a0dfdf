//! Router assembly for the Radar API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use super::handlers::{evaluate_token, get_stats, health_check, AppState};
use super::middleware::logging_middleware;

fn v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .route("/evaluate", post(evaluate_token))
}

/// `/v1/*` plus an unversioned `/health` for load balancers.
/// Outermost layer listed last.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/v1", v1_routes())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
}
