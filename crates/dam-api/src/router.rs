//! Route definitions for the DAM Hub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route, the body limit, and request logging.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(directory_routes())
        .merge(file_routes())
        .merge(setting_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Directory tree endpoints
fn directory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/directories/roots",
            get(handlers::directory::list_roots).post(handlers::directory::create_root),
        )
        .route("/directories", post(handlers::directory::create_directory))
        .route("/directories/move", post(handlers::directory::move_directories))
        .route(
            "/directories/{id}",
            get(handlers::directory::get_directory).put(handlers::directory::rename_directory),
        )
        .route(
            "/directories/{id}/children",
            get(handlers::directory::list_children),
        )
        .route("/directories/{id}/files", post(handlers::directory::upload_file))
}

/// File and version endpoints
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/move", post(handlers::file::move_files))
        .route(
            "/files/{id}",
            get(handlers::file::get_file).put(handlers::file::update_metadata),
        )
        .route(
            "/files/{id}/versions",
            get(handlers::file::list_versions).post(handlers::file::upload_version),
        )
}

/// Per-user storage settings
fn setting_routes() -> Router<AppState> {
    Router::new().route(
        "/users/settings",
        get(handlers::settings::get_setting).post(handlers::settings::create_setting),
    )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
