//! Template-ready projections of domain entities.

use chrono::{DateTime, Utc};

use crate::application::services::link_service::short_url;
use crate::domain::entities::Link;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A link with every field pre-formatted for display.
#[derive(Debug, Clone)]
pub struct LinkView {
    pub code: String,
    pub target_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: String,
    pub last_clicked: String,
}

impl LinkView {
    pub fn new(link: Link, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.code),
            created_at: format_timestamp(link.created_at),
            last_clicked: link
                .last_clicked
                .map(format_timestamp)
                .unwrap_or_else(|| "Never".to_string()),
            code: link.code,
            target_url: link.target_url,
            clicks: link.clicks,
        }
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
