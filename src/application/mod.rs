//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, listing and deletion
//! - [`services::redirect_service::RedirectService`] - Code resolution with click tracking

pub mod services;
