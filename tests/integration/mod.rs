/// Basic integration tests
use wellness_tracker_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_server_basic_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = TrackerServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");

        let created = create_habit(
            server.storage(),
            CreateHabitParams {
                name: "Meditate".to_string(),
                description: None,
                target_per_week: Some(5),
                color: None,
                icon: None,
            },
        )
        .expect("Failed to create habit");
        assert!(created.success);

        let habits = list_habits(server.storage()).expect("Failed to list habits");
        assert_eq!(habits.habits.len(), 1);
        assert_eq!(habits.habits[0].target_per_week, 5);
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let server = TrackerServer::new(db_path.clone())
            .await
            .expect("Failed to create first server");

        let created = create_habit(
            server.storage(),
            CreateHabitParams {
                name: "Read".to_string(),
                description: None,
                target_per_week: None,
                color: None,
                icon: None,
            },
        )
        .expect("Failed to create habit");
        drop(server);

        // Reopen the same database and check the habit survived
        let server2 = TrackerServer::new(db_path)
            .await
            .expect("Failed to create second server");

        let habits = list_habits(server2.storage()).expect("Failed to list habits");
        assert_eq!(habits.habits.len(), 1);
        assert_eq!(
            habits.habits[0].habit_id,
            created.habit_id.expect("missing habit id")
        );
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");

        // Test that storage implements the TrackerStorage trait
        let _: &dyn TrackerStorage = &storage;
    }

    #[test]
    fn test_log_to_report_flow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");

        let created = create_habit(
            &storage,
            CreateHabitParams {
                name: "Exercise".to_string(),
                description: None,
                target_per_week: None,
                color: None,
                icon: None,
            },
        )
        .expect("Failed to create habit");
        let habit_id = created.habit_id.expect("missing habit id");

        let today = Utc::now().naive_utc().date();
        for offset in 0..3 {
            let date = today - Duration::days(offset);
            log_habit(
                &storage,
                LogHabitParams {
                    habit_id: habit_id.clone(),
                    date: Some(date.to_string()),
                    completed: Some(true),
                    notes: None,
                },
            )
            .expect("Failed to log habit");
        }

        log_mood(
            &storage,
            LogMoodParams {
                date: None,
                mood_level: 4,
                energy_level: 3,
                sleep_hours: 7.5,
                notes: None,
            },
        )
        .expect("Failed to log mood");

        log_focus(
            &storage,
            LogFocusParams {
                task_name: "Deep work".to_string(),
                duration_minutes: 70,
                date: None,
                completed: Some(true),
            },
        )
        .expect("Failed to log focus");

        let report =
            weekly_report(&storage, ReportParams::default()).expect("Failed to build report");

        assert_eq!(report.weekly_stats.total_habits_completed, 3);
        assert_eq!(report.weekly_stats.total_focus_minutes, 70);
        assert_eq!(report.weekly_stats.average_sleep, 7.5);
        assert_eq!(report.habit_streaks.get("Exercise"), Some(&3));
        assert_eq!(report.mood_chart_data.len(), 1);
        assert_eq!(report.focus_chart_data.len(), 8);
    }

    #[test]
    fn test_relogging_same_day_overwrites() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");

        let created = create_habit(
            &storage,
            CreateHabitParams {
                name: "Journal".to_string(),
                description: None,
                target_per_week: None,
                color: None,
                icon: None,
            },
        )
        .expect("Failed to create habit");
        let habit_id = created.habit_id.expect("missing habit id");

        for completed in [true, false] {
            log_habit(
                &storage,
                LogHabitParams {
                    habit_id: habit_id.clone(),
                    date: None,
                    completed: Some(completed),
                    notes: None,
                },
            )
            .expect("Failed to log habit");
        }

        // One row for the day, and the second call won
        let report =
            weekly_report(&storage, ReportParams::default()).expect("Failed to build report");
        assert_eq!(report.weekly_stats.total_habits_completed, 0);
        assert_eq!(report.habit_streaks.get("Journal"), Some(&0));
    }
}
