//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Atomically increment `clicks` and touch `last_clicked` for the code
/// 2. Return 302 Found with the target URL in `Location`
///
/// Click tracking happens before the response is sent; a redirect that
/// returned 302 has always been counted.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target_url = state.redirect_service.resolve(&code).await?;

    // Header values must be ASCII; re-serializing through `Url` applies
    // punycode and percent-encoding to stored non-ASCII targets.
    let location = Url::parse(&target_url)
        .map(String::from)
        .unwrap_or(target_url);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
