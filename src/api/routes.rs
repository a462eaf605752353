//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All JSON API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /links`          - List links, newest first
/// - `POST   /links`          - Create a link (idempotent by target URL)
/// - `GET    /links/{code}`   - Link details and click metadata
/// - `DELETE /links/{code}`   - Permanently delete a link
/// - `GET    /health`         - Store connectivity check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/health", get(health_handler))
}
