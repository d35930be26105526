/// Tool for logging daily habit completion state
///
/// This module implements the habit_log MCP tool. Logging the same habit and
/// date twice overwrites the earlier state (upsert), so there is at most one
/// log per (habit, date) pair.

use serde::{Deserialize, Serialize};
use crate::domain::{HabitId, HabitLog};
use crate::storage::{StorageError, TrackerStorage};
use crate::tools::parse_date_or_today;

/// Parameters for logging a habit
#[derive(Debug, Deserialize)]
pub struct LogHabitParams {
    pub habit_id: String,
    /// Optional date, defaults to today
    pub date: Option<String>,
    /// Defaults to true
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

/// Response from logging a habit
#[derive(Debug, Serialize)]
pub struct LogHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Log a habit's completion state using the provided storage
pub fn log_habit<S: TrackerStorage>(
    storage: &S,
    params: LogHabitParams,
) -> Result<LogHabitResponse, StorageError> {
    let habit_id = HabitId::from_string(params.habit_id.trim())
        .map_err(|_| StorageError::InvalidInput("Invalid habit ID format".to_string()))?;

    // Verify habit exists (also resolves its name for the response)
    let habit = storage.get_habit(&habit_id)?;

    let date = parse_date_or_today(params.date.as_deref())?;
    let completed = params.completed.unwrap_or(true);

    let log = HabitLog::new(habit_id, date, completed, params.notes)
        .map_err(|e| StorageError::InvalidInput(e.to_string()))?;

    storage.upsert_log(&log)?;

    let message = if completed {
        format!("Logged '{}' as completed for {}", habit.name, date)
    } else {
        format!("Logged '{}' as skipped for {}", habit.name, date)
    };

    Ok(LogHabitResponse {
        success: true,
        message,
    })
}
