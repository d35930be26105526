/// MCP tools for the wellness tracker
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to record habits, mood and focus sessions and to pull the weekly
/// analytics report.

pub mod create;
pub mod log;
pub mod list;
pub mod mood;
pub mod focus;
pub mod report;

// Re-export tool functions for easy access
pub use create::*;
pub use log::*;
pub use list::*;
pub use mood::*;
pub use focus::*;
pub use report::*;

use chrono::{NaiveDate, Utc};
use crate::storage::StorageError;

/// Parse an optional YYYY-MM-DD date argument, defaulting to today
pub(crate) fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate, StorageError> {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| StorageError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", date_str))),
        None => Ok(Utc::now().naive_utc().date()),
    }
}
