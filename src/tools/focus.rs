/// Tool for recording focus sessions
///
/// This module implements the focus_log MCP tool. Any number of sessions can
/// be recorded per day.

use serde::{Deserialize, Serialize};
use crate::domain::FocusSession;
use crate::storage::{StorageError, TrackerStorage};
use crate::tools::parse_date_or_today;

/// Parameters for recording a focus session
#[derive(Debug, Deserialize)]
pub struct LogFocusParams {
    pub task_name: String,
    pub duration_minutes: u32,
    /// Optional date, defaults to today
    pub date: Option<String>,
    /// Defaults to true
    pub completed: Option<bool>,
}

/// Response from recording a focus session
#[derive(Debug, Serialize)]
pub struct LogFocusResponse {
    pub success: bool,
    pub session_id: Option<String>,
    pub message: String,
}

/// Record a finished focus session using the provided storage
pub fn log_focus<S: TrackerStorage>(
    storage: &S,
    params: LogFocusParams,
) -> Result<LogFocusResponse, StorageError> {
    let date = parse_date_or_today(params.date.as_deref())?;

    let session = FocusSession::new(
        params.task_name.clone(),
        params.duration_minutes,
        date,
        params.completed.unwrap_or(true),
    )
    .map_err(|e| StorageError::InvalidInput(e.to_string()))?;

    let session_id = session.id.to_string();

    storage.create_session(&session)?;

    Ok(LogFocusResponse {
        success: true,
        session_id: Some(session_id),
        message: format!(
            "Recorded {} minutes of focus on '{}' for {}",
            params.duration_minutes, params.task_name, date
        ),
    })
}
