//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation input
//! lives in a separate `NewLink` struct so the store can assign `id`,
//! `created_at` and the click counters.

pub mod link;

pub use link::{InsertOutcome, Link, NewLink};
