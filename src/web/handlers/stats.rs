//! Link statistics page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::view::LinkView;

/// Template for the link statistics page.
///
/// Renders `templates/stats.html` with target, click count, creation time
/// and last click time.
#[derive(Template, WebTemplate)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub link: LinkView,
}

/// Template shown when the code does not exist.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub code: String,
}

/// Renders the statistics page for a specific link.
///
/// # Endpoint
///
/// `GET /code/{code}`
///
/// Viewing this page does not count as a click.
///
/// # Errors
///
/// Renders `templates/not_found.html` with 404 if the code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.link_service.get_link(&code).await {
        Ok(link) => Ok(StatsTemplate {
            link: LinkView::new(link, &state.base_url),
        }
        .into_response()),
        Err(AppError::NotFound { .. }) => {
            Ok((StatusCode::NOT_FOUND, NotFoundTemplate { code }).into_response())
        }
        Err(e) => Err(e),
    }
}
