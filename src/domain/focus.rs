/// FocusSession entity for tracking timed focus work
///
/// Unlike habit logs and mood entries, focus sessions are not unique per day:
/// a user can record any number of sessions on the same date.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::log::validate_record_date;
use crate::domain::{DomainError, SessionId};

/// A single focus session (e.g., one pomodoro or deep-work block)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    /// Unique identifier for this session
    pub id: SessionId,
    /// What the user was working on
    pub task_name: String,
    /// Length of the session in minutes
    pub duration_minutes: u32,
    /// Which calendar day this session counts toward
    pub date: NaiveDate,
    /// Whether the session ran to completion
    pub completed: bool,
    /// When the session started
    pub start_time: DateTime<Utc>,
    /// When the session ended
    pub end_time: DateTime<Utc>,
}

impl FocusSession {
    /// Create a new focus session with validation
    ///
    /// Sessions are logged after the fact, so the end time is "now" and the
    /// start time is reconstructed from the duration.
    pub fn new(
        task_name: String,
        duration_minutes: u32,
        date: NaiveDate,
        completed: bool,
    ) -> Result<Self, DomainError> {
        Self::validate_task_name(&task_name)?;
        Self::validate_duration(duration_minutes)?;
        validate_record_date(&date)?;

        let end_time = Utc::now();
        let start_time = end_time - chrono::Duration::minutes(duration_minutes as i64);

        Ok(Self {
            id: SessionId::new(),
            task_name,
            duration_minutes,
            date,
            completed,
            start_time,
            end_time,
        })
    }

    /// Create a session from existing data (used when loading from database)
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: SessionId,
        task_name: String,
        duration_minutes: u32,
        date: NaiveDate,
        completed: bool,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_name,
            duration_minutes,
            date,
            completed,
            start_time,
            end_time,
        }
    }

    // Validation helper methods

    /// Validate the task name
    fn validate_task_name(task_name: &str) -> Result<(), DomainError> {
        let trimmed = task_name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidName(
                "Task name cannot be empty".to_string()
            ));
        }

        if trimmed.len() > 200 {
            return Err(DomainError::InvalidName(
                "Task name cannot be longer than 200 characters".to_string()
            ));
        }

        Ok(())
    }

    /// Validate the session duration (at most a full day)
    fn validate_duration(duration_minutes: u32) -> Result<(), DomainError> {
        if duration_minutes > 1440 {
            return Err(DomainError::InvalidValue {
                message: "Session duration cannot exceed 1440 minutes".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_session() {
        let today = Utc::now().naive_utc().date();

        let session = FocusSession::new("Deep work".to_string(), 45, today, true);

        assert!(session.is_ok());
        let session = session.unwrap();
        assert_eq!(session.duration_minutes, 45);
        assert_eq!(
            (session.end_time - session.start_time).num_minutes(),
            45
        );
    }

    #[test]
    fn test_zero_duration_allowed() {
        // Abandoned sessions are recorded with zero minutes
        let today = Utc::now().naive_utc().date();
        assert!(FocusSession::new("Sprint".to_string(), 0, today, false).is_ok());
    }

    #[test]
    fn test_empty_task_name_invalid() {
        let today = Utc::now().naive_utc().date();
        assert!(FocusSession::new("  ".to_string(), 25, today, true).is_err());
    }

    #[test]
    fn test_excessive_duration_invalid() {
        let today = Utc::now().naive_utc().date();
        assert!(FocusSession::new("Marathon".to_string(), 1441, today, true).is_err());
    }
}
