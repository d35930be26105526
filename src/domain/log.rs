/// HabitLog entity for tracking per-day habit completions
///
/// A habit log records whether a habit was completed on a specific calendar
/// date. There is at most one log per (habit, date) pair; the storage layer
/// enforces this with upsert semantics.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, HabitId, LogId};

/// A record of a habit's completion state on a specific day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    /// Unique identifier for this log
    pub id: LogId,
    /// Which habit this log is for
    pub habit_id: HabitId,
    /// Which calendar day this log is for
    pub date: NaiveDate,
    /// Whether the habit was completed that day
    pub completed: bool,
    /// User's notes about this day
    pub notes: Option<String>,
    /// When this log was created or last updated
    pub logged_at: DateTime<Utc>,
}

impl HabitLog {
    /// Create a new habit log with validation
    ///
    /// The logged_at timestamp is set to the current time.
    pub fn new(
        habit_id: HabitId,
        date: NaiveDate,
        completed: bool,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_record_date(&date)?;
        validate_notes(&notes)?;

        Ok(Self {
            id: LogId::new(),
            habit_id,
            date,
            completed,
            notes,
            logged_at: Utc::now(),
        })
    }

    /// Create a log from existing data (used when loading from database)
    pub fn from_existing(
        id: LogId,
        habit_id: HabitId,
        date: NaiveDate,
        completed: bool,
        notes: Option<String>,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            habit_id,
            date,
            completed,
            notes,
            logged_at,
        }
    }
}

/// Validate that a record date is not in the future and not older than a year
///
/// Shared by all dated record kinds (habit logs, mood entries, focus sessions).
pub(crate) fn validate_record_date(date: &NaiveDate) -> Result<(), DomainError> {
    let today = Utc::now().naive_utc().date();

    if *date > today {
        return Err(DomainError::InvalidDate(
            "Cannot log records for future dates".to_string()
        ));
    }

    let one_year_ago = today - chrono::Duration::days(365);
    if *date < one_year_ago {
        return Err(DomainError::InvalidDate(
            "Cannot log records more than 1 year in the past".to_string()
        ));
    }

    Ok(())
}

/// Validate an optional notes field (shared across record kinds)
pub(crate) fn validate_notes(notes: &Option<String>) -> Result<(), DomainError> {
    if let Some(note_text) = notes {
        if note_text.len() > 500 {
            return Err(DomainError::InvalidValue {
                message: "Notes cannot be longer than 500 characters".to_string()
            });
        }
    }
    Ok(())
}
