/// Storage layer for persisting tracker data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits, habit logs, mood
/// entries and focus sessions.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{FocusSession, Habit, HabitId, HabitLog, MoodEntry};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for tracker records
///
/// This trait allows us to potentially swap out SQLite for other databases
/// in the future while keeping the same interface. Uniqueness of habit logs
/// per (habit, date) and mood entries per date is enforced here via upserts,
/// not by the analytics engine.
pub trait TrackerStorage {
    /// Create a new habit
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// List all habits, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Insert a habit log, replacing any existing log for the same (habit, date)
    fn upsert_log(&self, log: &HabitLog) -> Result<(), StorageError>;

    /// List habit logs, optionally restricted to one habit, newest first
    fn list_logs(&self, habit_id: Option<&HabitId>) -> Result<Vec<HabitLog>, StorageError>;

    /// Get all habit logs within an inclusive date range
    fn logs_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<HabitLog>, StorageError>;

    /// Insert a mood entry, replacing any existing entry for the same date
    fn upsert_mood(&self, entry: &MoodEntry) -> Result<(), StorageError>;

    /// List mood entries, newest first
    fn list_moods(&self) -> Result<Vec<MoodEntry>, StorageError>;

    /// Get all mood entries within an inclusive date range
    fn moods_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MoodEntry>, StorageError>;

    /// Create a new focus session (sessions are never unique per day)
    fn create_session(&self, session: &FocusSession) -> Result<(), StorageError>;

    /// List focus sessions, newest first
    fn list_sessions(&self) -> Result<Vec<FocusSession>, StorageError>;

    /// Get all focus sessions within an inclusive date range
    fn sessions_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<FocusSession>, StorageError>;
}
