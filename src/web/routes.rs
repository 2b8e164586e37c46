//! Route definitions

use super::handlers;
use super::ratelimit;
use super::state::AppState;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{header, HeaderValue};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Bundled front-end, with a JSON 404 for anything unmatched
    let static_files = ServeDir::new(&state.settings.server.static_dir)
        .not_found_service(handlers::not_found.into_service());

    Router::new()
        // API routes
        .route(
            "/api/places",
            post(handlers::places).layer(middleware::from_fn_with_state(
                state.clone(),
                ratelimit::places_limit,
            )),
        )
        .route("/api/health", get(handlers::health))
        .fallback_service(static_files)
        // Add middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::global_limit,
        ))
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        // Add state
        .with_state(state)
}
