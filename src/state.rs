//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    /// Public origin used to build `short_url` values, e.g. `https://s.example.com`.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires both services to the same link store.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<Arc<str>>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            redirect_service: Arc::new(RedirectService::new(link_repository)),
            base_url: base_url.into(),
        }
    }
}
