//! HTML template rendering handlers for the web dashboard.

mod dashboard;
mod stats;

pub use dashboard::dashboard_handler;
pub use stats::stats_handler;
