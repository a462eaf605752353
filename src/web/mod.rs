//! Web dashboard layer for browser-based UI.
//!
//! Provides HTML pages for link management and statistics.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Dashboard route configuration
//! - [`view`] - Display-formatted link projections

pub mod handlers;
pub mod routes;
pub mod view;
