//! Link creation, lookup, listing and deletion.

use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, validate_custom_code};
use crate::utils::url_validator::validate_target_url;
use serde_json::json;
use tracing::{debug, info};

/// Maximum number of generated codes tried before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Outcome of [`LinkService::create_link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCreation {
    /// A new link was stored.
    Created(Link),
    /// The target URL was already shortened; the stored link is returned unchanged.
    Existing(Link),
}

impl LinkCreation {
    /// Returns true if the link existed before this request.
    pub fn is_existing(&self) -> bool {
        matches!(self, LinkCreation::Existing(_))
    }

    pub fn link(&self) -> &Link {
        match self {
            LinkCreation::Created(link) | LinkCreation::Existing(link) => link,
        }
    }

    pub fn into_link(self) -> Link {
        match self {
            LinkCreation::Created(link) | LinkCreation::Existing(link) => link,
        }
    }
}

/// Service for creating and managing shortened links.
///
/// Holds no state of its own besides the repository handle; all consistency
/// guarantees come from the repository's atomic operations.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link, or returns the existing one for the same URL.
    ///
    /// # Arguments
    ///
    /// - `target_url` - The URL to shorten, stored verbatim
    /// - `custom_code` - Optional custom short code; an empty string counts as absent
    ///
    /// # Deduplication
    ///
    /// An already-shortened `target_url` is answered with
    /// [`LinkCreation::Existing`] before the custom code is looked at.
    ///
    /// # Code Generation
    ///
    /// Without a custom code, a random 6-character code is generated. A code
    /// the store reports as taken is replaced, up to 10 times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL or the custom code is malformed.
    /// Returns [`AppError::CodeConflict`] if the custom code is already taken.
    /// Returns [`AppError::StoreUnavailable`] on store failure or when no free
    /// code was found.
    pub async fn create_link(
        &self,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<LinkCreation, AppError> {
        validate_target_url(&target_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self.link_repository.find_by_target_url(&target_url).await? {
            debug!(code = %existing.code, "Target URL already shortened");
            return Ok(LinkCreation::Existing(existing));
        }

        let creation = match custom_code.filter(|code| !code.is_empty()) {
            Some(code) => self.create_with_custom_code(target_url, code).await?,
            None => self.create_with_generated_code(target_url).await?,
        };

        if let LinkCreation::Created(link) = &creation {
            info!(code = %link.code, id = link.id, "Created short link");
        }

        Ok(creation)
    }

    async fn create_with_custom_code(
        &self,
        target_url: String,
        code: String,
    ) -> Result<LinkCreation, AppError> {
        validate_custom_code(&code)?;

        let new_link = NewLink {
            code: code.clone(),
            target_url,
        };

        match self.link_repository.create_or_get(new_link).await? {
            InsertOutcome::Created(link) => Ok(LinkCreation::Created(link)),
            InsertOutcome::Existing(link) => Ok(LinkCreation::Existing(link)),
            InsertOutcome::CodeTaken => Err(AppError::conflict(
                "Code already exists",
                json!({ "code": code }),
            )),
        }
    }

    async fn create_with_generated_code(
        &self,
        target_url: String,
    ) -> Result<LinkCreation, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let new_link = NewLink {
                code: generate_code(DEFAULT_CODE_LENGTH),
                target_url: target_url.clone(),
            };

            match self.link_repository.create_or_get(new_link).await? {
                InsertOutcome::Created(link) => return Ok(LinkCreation::Created(link)),
                InsertOutcome::Existing(link) => return Ok(LinkCreation::Existing(link)),
                InsertOutcome::CodeTaken => {
                    debug!(attempt, "Generated code collided, retrying");
                }
            }
        }

        Err(AppError::store_unavailable(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Returns all links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failure.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::StoreUnavailable`] on store failure.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::StoreUnavailable`] on store failure.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        info!(code, "Deleted short link");
        Ok(())
    }

    /// Returns the number of links and the sum of their clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failure.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        self.link_repository.totals().await
    }

    /// Checks that the link store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when it is not.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

/// Joins the public base URL and a code into the shareable short URL.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
