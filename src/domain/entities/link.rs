//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with click metadata.
///
/// Represents the mapping between a short code and its target URL, plus the
/// running click counter maintained by the redirect path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        last_clicked: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            clicks,
            created_at,
            last_clicked,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

/// Result of an atomic find-or-create against the link store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written.
    Created(Link),
    /// A link for the same target URL already existed and was returned as-is.
    Existing(Link),
    /// The requested code belongs to another link; nothing was written.
    CodeTaken,
}
