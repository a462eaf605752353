//! Repository trait for short link data access.

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Every method is a single atomic operation against the backing store.
/// Callers never combine a read and a write into one logical update; the
/// operations that need read-modify-write semantics ([`Self::create_or_get`]
/// and [`Self::increment_and_touch`]) perform them inside the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link unless one already exists for the same target URL.
    ///
    /// # Returns
    ///
    /// - [`InsertOutcome::Created`] when a new row was written
    /// - [`InsertOutcome::Existing`] when `target_url` is already shortened
    /// - [`InsertOutcome::CodeTaken`] when `code` belongs to another link
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn create_or_get(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its exact target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_target_url(&self, target_url: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Permanently removes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the code was unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically increments `clicks` and sets `last_clicked` to now.
    ///
    /// Returns the updated link, or `Ok(None)` if the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn increment_and_touch(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Counts stored links and the sum of their clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn totals(&self) -> Result<LinkTotals, AppError>;

    /// Checks that the backing store answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Aggregate counters across all links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTotals {
    pub links: i64,
    pub clicks: i64,
}
