use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all snip endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/languages", get(handler::languages_handler))
        .route("/v1/snippets", post(handler::create_snippet_handler))
        .route("/v1/snippets/:public_id", get(handler::get_snippet_handler))
        .route(
            "/v1/snippets/:public_id/versions",
            post(handler::create_version_handler),
        )
        .route(
            "/v1/snippets/:public_id/versions/:version",
            get(handler::get_version_handler),
        )
        .route("/v1/snippets/:public_id/diff", get(handler::diff_handler))
        .route(
            "/v1/versions/:version_id/feedback",
            get(handler::get_feedback_handler).post(handler::add_feedback_handler),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
