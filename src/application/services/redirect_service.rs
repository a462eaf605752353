//! Short code resolution with click tracking.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::debug;

/// Resolves short codes to target URLs and records the click.
///
/// Lookup and counter update are one repository call
/// ([`LinkRepository::increment_and_touch`]), so the URL returned is the one
/// belonging to the row that was incremented, and concurrent redirects for
/// the same code are all counted.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
}

impl RedirectService {
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Returns the target URL for `code` after counting the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist (including a
    /// link deleted while the request was in flight).
    /// Returns [`AppError::StoreUnavailable`] on store failure.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .increment_and_touch(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        debug!(code, clicks = link.clicks, "Resolved short link");

        Ok(link.target_url)
    }
}
