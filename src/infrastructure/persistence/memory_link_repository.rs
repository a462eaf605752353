//! Process-local implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    links: HashMap<String, Link>,
}

/// In-memory link store.
///
/// Every operation runs under a single store-wide mutex, which gives the same
/// guarantees the PostgreSQL constraints and single-statement updates give:
/// unique codes, one link per target URL, and no lost click increments.
/// The lock is never held across an `.await`.
///
/// Data lives only as long as the process. Used for local development
/// (`STORAGE_BACKEND=memory`) and in tests.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    inner: Mutex<Inner>,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create_or_get(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let mut inner = self.inner.lock();

        if let Some(existing) = inner
            .links
            .values()
            .find(|link| link.target_url == new_link.target_url)
        {
            return Ok(InsertOutcome::Existing(existing.clone()));
        }

        if inner.links.contains_key(&new_link.code) {
            return Ok(InsertOutcome::CodeTaken);
        }

        inner.next_id += 1;
        let link = Link::new(
            inner.next_id,
            new_link.code,
            new_link.target_url,
            0,
            Utc::now(),
            None,
        );
        inner.links.insert(link.code.clone(), link.clone());

        Ok(InsertOutcome::Created(link))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.inner.lock().links.get(code).cloned())
    }

    async fn find_by_target_url(&self, target_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .inner
            .lock()
            .links
            .values()
            .find(|link| link.target_url == target_url)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.inner.lock().links.values().cloned().collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.inner.lock().links.remove(code).is_some())
    }

    async fn increment_and_touch(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut inner = self.inner.lock();
        let Some(link) = inner.links.get_mut(code) else {
            return Ok(None);
        };

        let now = Utc::now();
        link.clicks += 1;
        link.last_clicked = Some(link.last_clicked.map_or(now, |prev| prev.max(now)));

        Ok(Some(link.clone()))
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let inner = self.inner.lock();
        Ok(LinkTotals {
            links: inner.links.len() as i64,
            clicks: inner.links.values().map(|link| link.clicks).sum(),
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
