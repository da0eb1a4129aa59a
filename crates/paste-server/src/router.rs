use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all paste endpoints.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    Router::new()
        .route("/", get(handler::index))
        .route("/paste", post(handler::create_paste))
        .route("/paste/:id", get(handler::show_paste))
        .route("/s/:short_id", get(handler::short_redirect))
        .route("/raw/:id", get(handler::raw_paste))
        .route("/v1/pastes", post(handler::api_create_paste))
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
