//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /{code}`       - Short link redirect
//! - `/api/*`             - JSON API (links, health)
//! - `GET  /`             - Dashboard
//! - `GET  /code/{code}`  - Per-link statistics page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
///
/// Static routes (`/`, `/api/*`, `/code/*`) take precedence over the
/// `/{code}` capture, so a short code never shadows them.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::routes())
        .merge(web::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`router`] so `/api/links/` and `/api/links` resolve to the same route.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
