/// Basic unit tests to verify core functionality
use wellness_tracker_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new(
            "Test Habit".to_string(),
            Some("A test habit".to_string()),
            7,
            None,
            None,
        );

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.target_per_week, 7);
    }

    #[test]
    fn test_habit_log_creation() {
        let habit_id = HabitId::new();
        let today = chrono::Utc::now().naive_utc().date();

        let log = HabitLog::new(habit_id, today, true, Some("Great work!".to_string()));

        assert!(log.is_ok());
        let log = log.unwrap();
        assert_eq!(log.habit_id, habit_id);
        assert_eq!(log.date, today);
        assert!(log.completed);
    }

    #[test]
    fn test_mood_entry_bounds() {
        let today = chrono::Utc::now().naive_utc().date();

        assert!(MoodEntry::new(today, 3, 4, 7.5, None).is_ok());
        assert!(MoodEntry::new(today, 0, 4, 7.5, None).is_err());
        assert!(MoodEntry::new(today, 3, 6, 7.5, None).is_err());
        assert!(MoodEntry::new(today, 3, 4, 25.0, None).is_err());
    }

    #[test]
    fn test_focus_session_creation() {
        let today = chrono::Utc::now().naive_utc().date();

        let session = FocusSession::new("Deep work".to_string(), 50, today, true);

        assert!(session.is_ok());
        let session = session.unwrap();
        assert_eq!(session.duration_minutes, 50);
        assert!(session.completed);
    }

    #[tokio::test]
    async fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = TrackerServer::new(temp_file.path().to_path_buf()).await;
        assert!(server.is_ok());
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }

    #[test]
    fn test_reporting_window_covers_eight_days() {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let window = ReportingWindow::ending_at(today);

        assert_eq!(window.dates().len(), 8);
        assert!(window.contains(window.start()));
        assert!(window.contains(window.end()));
    }
}
