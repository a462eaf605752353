//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::link_service::short_url;
use crate::domain::entities::Link;

/// Request to shorten a single URL.
///
/// Only the shape of `target_url` is checked here; scheme, host and custom
/// code rules are enforced by [`crate::application::services::LinkService`].
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The URL to shorten (must be valid HTTP/HTTPS).
    #[serde(default)]
    #[validate(length(min = 1, message = "target_url is required"))]
    pub target_url: String,

    /// Optional custom short code, 6-8 alphanumeric characters.
    #[serde(default)]
    pub code: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl LinkResponse {
    /// Builds the response, deriving `short_url` from the public base URL.
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.code),
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            clicks: link.clicks,
            created_at: link.created_at,
            last_clicked: link.last_clicked,
        }
    }
}

/// Response to a create request.
///
/// `existing` is true when the target URL had already been shortened and
/// the stored link was returned instead of creating a new one.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub link: LinkResponse,
    pub existing: bool,
}

/// Acknowledgement for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub ok: bool,
}
