/// Tool producing the weekly analytics report
///
/// This module implements the weekly_report MCP tool. It is the seam between
/// the plumbing and the engine: the clock is read here, the record
/// collections are loaded here, and the pure engine does the rest.

use serde::Deserialize;
use crate::analytics::{generate_report, AnalyticsReport, ReportingWindow};
use crate::storage::{StorageError, TrackerStorage};
use crate::tools::parse_date_or_today;

/// Parameters for the weekly report
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// Report "as of" this date instead of today (YYYY-MM-DD, optional)
    pub today: Option<String>,
}

/// Build the weekly analytics report from stored records
pub fn weekly_report<S: TrackerStorage>(
    storage: &S,
    params: ReportParams,
) -> Result<AnalyticsReport, StorageError> {
    let today = parse_date_or_today(params.today.as_deref())?;

    let window = ReportingWindow::ending_at(today);

    let habits = storage.list_habits()?;
    let logs = storage.logs_in_range(window.start(), window.end())?;
    let moods = storage.moods_in_range(window.start(), window.end())?;
    let sessions = storage.sessions_in_range(window.start(), window.end())?;

    tracing::debug!(
        "Generating report for {}: {} habits, {} logs, {} moods, {} sessions",
        today,
        habits.len(),
        logs.len(),
        moods.len(),
        sessions.len()
    );

    Ok(generate_report(today, &habits, &logs, &moods, &sessions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FocusSession, Habit, HabitLog, MoodEntry};
    use crate::storage::SqliteStorage;
    use chrono::{Duration, Utc};
    use tempfile::NamedTempFile;

    // The NamedTempFile must be kept alive alongside the storage; dropping it
    // deletes the database file out from under the open connection.
    fn storage() -> (SqliteStorage, NamedTempFile) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage =
            SqliteStorage::new(temp_file.path().to_path_buf()).expect("Failed to create storage");
        (storage, temp_file)
    }

    #[test]
    fn test_report_on_empty_database() {
        let (storage, _temp_file) = storage();

        let report = weekly_report(&storage, ReportParams::default()).unwrap();

        assert_eq!(report.weekly_stats.total_habits_completed, 0);
        assert!(report.insights.is_empty());
        assert!(report.habit_streaks.is_empty());
        assert!(report.mood_chart_data.is_empty());
        assert_eq!(report.focus_chart_data.len(), 8);
    }

    #[test]
    fn test_report_end_to_end() {
        let (storage, _temp_file) = storage();
        let today = Utc::now().naive_utc().date();

        let habit = Habit::new("Meditate".to_string(), None, 7, None, None).unwrap();
        storage.create_habit(&habit).unwrap();
        for offset in [0, 2, 4] {
            storage
                .upsert_log(
                    &HabitLog::new(habit.id, today - Duration::days(offset), true, None).unwrap(),
                )
                .unwrap();
        }

        storage
            .upsert_mood(&MoodEntry::new(today, 4, 4, 7.0, None).unwrap())
            .unwrap();
        storage
            .create_session(&FocusSession::new("Deep work".to_string(), 70, today, true).unwrap())
            .unwrap();

        let report = weekly_report(&storage, ReportParams::default()).unwrap();

        assert_eq!(report.weekly_stats.total_habits_completed, 3);
        assert_eq!(report.weekly_stats.total_focus_minutes, 70);
        assert_eq!(report.habit_streaks.get("Meditate"), Some(&3));

        let streak = report
            .insights
            .iter()
            .find(|i| i.insight_type == "habit_streak")
            .unwrap();
        assert_eq!(streak.value, "3 days");

        // 70 minutes / 7 days
        let focus = report
            .insights
            .iter()
            .find(|i| i.insight_type == "focus_productivity")
            .unwrap();
        assert_eq!(focus.value, "10 min");
    }

    #[test]
    fn test_report_respects_as_of_date() {
        let (storage, _temp_file) = storage();
        let today = Utc::now().naive_utc().date();

        let habit = Habit::new("Meditate".to_string(), None, 7, None, None).unwrap();
        storage.create_habit(&habit).unwrap();
        storage
            .upsert_log(&HabitLog::new(habit.id, today, true, None).unwrap())
            .unwrap();

        // A window ending 30 days ago excludes today's log
        let as_of = today - Duration::days(30);
        let report = weekly_report(
            &storage,
            ReportParams {
                today: Some(as_of.to_string()),
            },
        )
        .unwrap();

        assert_eq!(report.weekly_stats.total_habits_completed, 0);
        assert_eq!(report.habit_streaks.get("Meditate"), Some(&0));
    }
}
