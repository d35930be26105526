/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use serde::{Deserialize, Serialize};
use crate::domain::Habit;
use crate::storage::{StorageError, TrackerStorage};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize)]
pub struct CreateHabitParams {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to 7 (daily habit)
    pub target_per_week: Option<u32>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: Option<String>,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn create_habit<S: TrackerStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, StorageError> {
    let habit = Habit::new(
        params.name.clone(),
        params.description,
        params.target_per_week.unwrap_or(7),
        params.color,
        params.icon,
    )
    .map_err(|e| StorageError::InvalidInput(e.to_string()))?;

    let habit_id = habit.id.to_string();

    storage.create_habit(&habit)?;

    Ok(CreateHabitResponse {
        success: true,
        habit_id: Some(habit_id),
        message: format!("Created habit '{}'! Ready to start your streak!", params.name),
    })
}
