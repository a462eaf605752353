//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::view::LinkView;

/// Template for the dashboard home page.
///
/// Renders `templates/dashboard.html` with:
/// - Link creation form (posts to `/api/links`)
/// - Searchable link table with click counts
/// - Copy and delete actions
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub links: Vec<LinkView>,
    pub total_clicks: i64,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /`
///
/// The link table is rendered server-side; create and delete go through
/// the JSON API and reload the page.
pub async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<DashboardTemplate, AppError> {
    let links: Vec<LinkView> = state
        .link_service
        .list_links()
        .await?
        .into_iter()
        .map(|link| LinkView::new(link, &state.base_url))
        .collect();

    let total_clicks = links.iter().map(|link| link.clicks).sum();

    Ok(DashboardTemplate {
        links,
        total_clicks,
    })
}
