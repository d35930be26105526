/// Tool for listing habits with their current week's progress
///
/// This module implements the habit_list MCP tool.

use chrono::Utc;
use serde::Serialize;
use crate::analytics::ReportingWindow;
use crate::storage::{StorageError, TrackerStorage};

/// One habit with its in-window completion count
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_per_week: u32,
    /// Completed logs within the current reporting window
    pub completed_this_week: u32,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
}

/// List all habits with their completion counts for the current window
pub fn list_habits<S: TrackerStorage>(storage: &S) -> Result<ListHabitsResponse, StorageError> {
    let habits = storage.list_habits()?;

    let window = ReportingWindow::ending_at(Utc::now().naive_utc().date());
    let logs = storage.logs_in_range(window.start(), window.end())?;

    let habits = habits
        .into_iter()
        .map(|habit| {
            let completed_this_week = logs
                .iter()
                .filter(|l| l.habit_id == habit.id && l.completed)
                .count() as u32;

            HabitSummary {
                habit_id: habit.id.to_string(),
                name: habit.name,
                description: habit.description,
                target_per_week: habit.target_per_week,
                completed_this_week,
            }
        })
        .collect();

    Ok(ListHabitsResponse { habits })
}
