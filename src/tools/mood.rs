/// Tool for the daily mood/energy/sleep check-in
///
/// This module implements the mood_log MCP tool. There is one entry per day;
/// logging again for the same date overwrites the earlier entry.

use serde::{Deserialize, Serialize};
use crate::domain::MoodEntry;
use crate::storage::{StorageError, TrackerStorage};
use crate::tools::parse_date_or_today;

/// Parameters for logging a mood entry
#[derive(Debug, Deserialize)]
pub struct LogMoodParams {
    /// Optional date, defaults to today
    pub date: Option<String>,
    /// 1 (worst) to 5 (best)
    pub mood_level: u8,
    /// 1 (worst) to 5 (best)
    pub energy_level: u8,
    pub sleep_hours: f64,
    pub notes: Option<String>,
}

/// Response from logging a mood entry
#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub success: bool,
    pub message: String,
}

/// Record the mood check-in for a day using the provided storage
pub fn log_mood<S: TrackerStorage>(
    storage: &S,
    params: LogMoodParams,
) -> Result<LogMoodResponse, StorageError> {
    let date = parse_date_or_today(params.date.as_deref())?;

    let entry = MoodEntry::new(
        date,
        params.mood_level,
        params.energy_level,
        params.sleep_hours,
        params.notes,
    )
    .map_err(|e| StorageError::InvalidInput(e.to_string()))?;

    storage.upsert_mood(&entry)?;

    Ok(LogMoodResponse {
        success: true,
        message: format!(
            "Recorded mood {}/5, energy {}/5, {:.1}h sleep for {}",
            params.mood_level, params.energy_level, params.sleep_hours, date
        ),
    })
}
