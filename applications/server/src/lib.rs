//! Watchplan Server Library
//!
//! Multi-user playlist scheduling server: tracks YouTube playlists per user,
//! derives watch schedules on every read and exposes them over HTTP.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router.
pub fn create_router(app_state: AppState, auth_service: Arc<AuthService>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Playlists
        .route("/playlists", get(api::playlists::list_playlists))
        .route("/playlists/import", post(api::playlists::import_playlist))
        .route("/playlists/:id", get(api::playlists::get_playlist))
        .route("/playlists/:id", delete(api::playlists::delete_playlist))
        .route(
            "/playlists/:id/refresh",
            post(api::playlists::refresh_playlist),
        )
        .route(
            "/playlists/:id/config",
            patch(api::playlists::update_config),
        )
        .route(
            "/playlists/:id/progress",
            post(api::playlists::set_progress),
        )
        // Migration
        .route(
            "/migration/local-state",
            post(api::migration::migrate_local_state),
        )
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::require_auth,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
