/// SQLite implementation of the tracker storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving tracker records. It handles all SQL queries and data
/// conversion.

use std::path::PathBuf;
use rusqlite::{params, Connection, Row};
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    FocusSession, Habit, HabitId, HabitLog, LogId, MoodEntry, MoodId, SessionId,
};
use crate::storage::{migrations, StorageError, TrackerStorage};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the TrackerStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // Enable foreign key constraints
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        // Initialize/migrate the database schema
        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    // Row-mapping helpers. rusqlite wants its own error type out of row
    // closures, so parse failures are reported as invalid column types.

    fn invalid_column(idx: usize, what: &str) -> rusqlite::Error {
        rusqlite::Error::InvalidColumnType(idx, what.to_string(), rusqlite::types::Type::Text)
    }

    fn parse_date(idx: usize, s: &str) -> Result<NaiveDate, rusqlite::Error> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Self::invalid_column(idx, "Invalid date"))
    }

    fn parse_datetime(idx: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| Self::invalid_column(idx, "Invalid datetime"))
    }

    fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
        let id_str: String = row.get(0)?;
        let id = HabitId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let created_at_str: String = row.get(6)?;
        let created_at = Self::parse_datetime(6, &created_at_str)?;

        Ok(Habit::from_existing(
            id,
            row.get(1)?, // name
            row.get(2)?, // description
            row.get(3)?, // target_per_week
            row.get(4)?, // color
            row.get(5)?, // icon
            created_at,
        ))
    }

    fn log_from_row(row: &Row<'_>) -> rusqlite::Result<HabitLog> {
        let id_str: String = row.get(0)?;
        let id = LogId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let habit_id_str: String = row.get(1)?;
        let habit_id = HabitId::from_string(&habit_id_str)
            .map_err(|_| Self::invalid_column(1, "Invalid UUID"))?;

        let date_str: String = row.get(2)?;
        let date = Self::parse_date(2, &date_str)?;

        let logged_at_str: String = row.get(5)?;
        let logged_at = Self::parse_datetime(5, &logged_at_str)?;

        Ok(HabitLog::from_existing(
            id,
            habit_id,
            date,
            row.get(3)?, // completed
            row.get(4)?, // notes
            logged_at,
        ))
    }

    fn mood_from_row(row: &Row<'_>) -> rusqlite::Result<MoodEntry> {
        let id_str: String = row.get(0)?;
        let id = MoodId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let date_str: String = row.get(1)?;
        let date = Self::parse_date(1, &date_str)?;

        let logged_at_str: String = row.get(6)?;
        let logged_at = Self::parse_datetime(6, &logged_at_str)?;

        Ok(MoodEntry::from_existing(
            id,
            date,
            row.get(2)?, // mood_level
            row.get(3)?, // energy_level
            row.get(4)?, // sleep_hours
            row.get(5)?, // notes
            logged_at,
        ))
    }

    fn session_from_row(row: &Row<'_>) -> rusqlite::Result<FocusSession> {
        let id_str: String = row.get(0)?;
        let id = SessionId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let date_str: String = row.get(3)?;
        let date = Self::parse_date(3, &date_str)?;

        let start_str: String = row.get(5)?;
        let start_time = Self::parse_datetime(5, &start_str)?;

        let end_str: String = row.get(6)?;
        let end_time = Self::parse_datetime(6, &end_str)?;

        Ok(FocusSession::from_existing(
            id,
            row.get(1)?, // task_name
            row.get(2)?, // duration_minutes
            date,
            row.get(4)?, // completed
            start_time,
            end_time,
        ))
    }
}

impl TrackerStorage for SqliteStorage {
    /// Create a new habit in the database
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habits (
                id, name, description, target_per_week, color, icon, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.target_per_week,
                habit.color,
                habit.icon,
                habit.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    /// Get a habit by its ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, target_per_week, color, icon, created_at
             FROM habits WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![habit_id.to_string()], Self::habit_from_row);

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// List all habits, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, target_per_week, color, icon, created_at
             FROM habits ORDER BY created_at DESC",
        )?;

        let habit_iter = stmt.query_map([], Self::habit_from_row)?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }

        Ok(habits)
    }

    /// Insert a habit log, replacing any existing log for the same (habit, date)
    ///
    /// On conflict the original row id is kept; completion state, notes and
    /// the logged_at timestamp are overwritten.
    fn upsert_log(&self, log: &HabitLog) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habit_logs (
                id, habit_id, date, completed, notes, logged_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(habit_id, date) DO UPDATE SET
                completed = excluded.completed,
                notes = excluded.notes,
                logged_at = excluded.logged_at",
            params![
                log.id.to_string(),
                log.habit_id.to_string(),
                log.date.to_string(),
                log.completed,
                log.notes,
                log.logged_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Upserted habit log for habit {} on {}", log.habit_id, log.date);
        Ok(())
    }

    /// List habit logs, optionally restricted to one habit, newest first
    fn list_logs(&self, habit_id: Option<&HabitId>) -> Result<Vec<HabitLog>, StorageError> {
        let mut logs = Vec::new();

        match habit_id {
            Some(habit_id) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, habit_id, date, completed, notes, logged_at
                     FROM habit_logs WHERE habit_id = ?1
                     ORDER BY date DESC, logged_at DESC",
                )?;
                let iter = stmt.query_map(params![habit_id.to_string()], Self::log_from_row)?;
                for log in iter {
                    logs.push(log?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, habit_id, date, completed, notes, logged_at
                     FROM habit_logs ORDER BY date DESC, logged_at DESC",
                )?;
                let iter = stmt.query_map([], Self::log_from_row)?;
                for log in iter {
                    logs.push(log?);
                }
            }
        }

        Ok(logs)
    }

    /// Get all habit logs within an inclusive date range
    fn logs_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<HabitLog>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed, notes, logged_at
             FROM habit_logs
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC",
        )?;

        let iter = stmt.query_map(
            params![start_date.to_string(), end_date.to_string()],
            Self::log_from_row,
        )?;

        let mut logs = Vec::new();
        for log in iter {
            logs.push(log?);
        }

        Ok(logs)
    }

    /// Insert a mood entry, replacing any existing entry for the same date
    fn upsert_mood(&self, entry: &MoodEntry) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO mood_entries (
                id, date, mood_level, energy_level, sleep_hours, notes, logged_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(date) DO UPDATE SET
                mood_level = excluded.mood_level,
                energy_level = excluded.energy_level,
                sleep_hours = excluded.sleep_hours,
                notes = excluded.notes,
                logged_at = excluded.logged_at",
            params![
                entry.id.to_string(),
                entry.date.to_string(),
                entry.mood_level,
                entry.energy_level,
                entry.sleep_hours,
                entry.notes,
                entry.logged_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Upserted mood entry for {}", entry.date);
        Ok(())
    }

    /// List mood entries, newest first
    fn list_moods(&self) -> Result<Vec<MoodEntry>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, mood_level, energy_level, sleep_hours, notes, logged_at
             FROM mood_entries ORDER BY date DESC",
        )?;

        let iter = stmt.query_map([], Self::mood_from_row)?;

        let mut entries = Vec::new();
        for entry in iter {
            entries.push(entry?);
        }

        Ok(entries)
    }

    /// Get all mood entries within an inclusive date range
    fn moods_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MoodEntry>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, mood_level, energy_level, sleep_hours, notes, logged_at
             FROM mood_entries
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC",
        )?;

        let iter = stmt.query_map(
            params![start_date.to_string(), end_date.to_string()],
            Self::mood_from_row,
        )?;

        let mut entries = Vec::new();
        for entry in iter {
            entries.push(entry?);
        }

        Ok(entries)
    }

    /// Create a new focus session
    fn create_session(&self, session: &FocusSession) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO focus_sessions (
                id, task_name, duration_minutes, date, completed, start_time, end_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session.id.to_string(),
                session.task_name,
                session.duration_minutes,
                session.date.to_string(),
                session.completed,
                session.start_time.to_rfc3339(),
                session.end_time.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Created focus session: {} ({})", session.task_name, session.id);
        Ok(())
    }

    /// List focus sessions, newest first
    fn list_sessions(&self) -> Result<Vec<FocusSession>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_name, duration_minutes, date, completed, start_time, end_time
             FROM focus_sessions ORDER BY start_time DESC",
        )?;

        let iter = stmt.query_map([], Self::session_from_row)?;

        let mut sessions = Vec::new();
        for session in iter {
            sessions.push(session?);
        }

        Ok(sessions)
    }

    /// Get all focus sessions within an inclusive date range
    fn sessions_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<FocusSession>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_name, duration_minutes, date, completed, start_time, end_time
             FROM focus_sessions
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC, start_time ASC",
        )?;

        let iter = stmt.query_map(
            params![start_date.to_string(), end_date.to_string()],
            Self::session_from_row,
        )?;

        let mut sessions = Vec::new();
        for session in iter {
            sessions.push(session?);
        }

        Ok(sessions)
    }
}
