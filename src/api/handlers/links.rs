//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse, DeleteLinkResponse, LinkResponse};
use crate::application::services::LinkCreation;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link, or returns the existing one for the same URL.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "code": "MyLink1"   // optional, 6-8 alphanumeric characters
/// }
/// ```
///
/// # Response
///
/// - **201 Created** with `"existing": false` for a new link
/// - **200 OK** with `"existing": true` when the URL was already shortened
///
/// ```json
/// {
///   "link": {
///     "id": 1,
///     "code": "MyLink1",
///     "target_url": "https://example.com",
///     "short_url": "http://localhost:3000/MyLink1",
///     "clicks": 0,
///     "created_at": "2025-01-01T00:00:00Z",
///     "last_clicked": null
///   },
///   "existing": false
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON of the expected
/// shape, or if the URL or code is invalid.
/// Returns 409 Conflict if the custom code is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let creation = state
        .link_service
        .create_link(payload.target_url, payload.code)
        .await?;

    let (status, existing, link) = match creation {
        LinkCreation::Created(link) => (StatusCode::CREATED, false, link),
        LinkCreation::Existing(link) => (StatusCode::OK, true, link),
    };

    Ok((
        status,
        Json(CreateLinkResponse {
            link: LinkResponse::from_link(link, &state.base_url),
            existing,
        }),
    ))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkResponse::from_link(link, &state.base_url))
            .collect(),
    ))
}

/// Returns a single link with its click metadata.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Behavior
///
/// The row is removed; subsequent redirects for this code return 404 and the
/// code becomes available again.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse { ok: true }))
}
