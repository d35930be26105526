/// MoodEntry entity for the daily mood/energy/sleep check-in
///
/// There is at most one mood entry per calendar date; the storage layer
/// enforces this with upsert semantics.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::log::{validate_notes, validate_record_date};
use crate::domain::{DomainError, MoodId};

/// The user's self-reported mood, energy and sleep for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Unique identifier for this entry
    pub id: MoodId,
    /// Which calendar day this entry is for
    pub date: NaiveDate,
    /// Self-reported mood, 1 (worst) to 5 (best)
    pub mood_level: u8,
    /// Self-reported energy, 1 (worst) to 5 (best)
    pub energy_level: u8,
    /// Hours slept the night before
    pub sleep_hours: f64,
    /// User's notes about this day
    pub notes: Option<String>,
    /// When this entry was created or last updated
    pub logged_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Create a new mood entry with validation
    pub fn new(
        date: NaiveDate,
        mood_level: u8,
        energy_level: u8,
        sleep_hours: f64,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_record_date(&date)?;
        Self::validate_level("Mood", mood_level)?;
        Self::validate_level("Energy", energy_level)?;
        Self::validate_sleep_hours(sleep_hours)?;
        validate_notes(&notes)?;

        Ok(Self {
            id: MoodId::new(),
            date,
            mood_level,
            energy_level,
            sleep_hours,
            notes,
            logged_at: Utc::now(),
        })
    }

    /// Create an entry from existing data (used when loading from database)
    pub fn from_existing(
        id: MoodId,
        date: NaiveDate,
        mood_level: u8,
        energy_level: u8,
        sleep_hours: f64,
        notes: Option<String>,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            mood_level,
            energy_level,
            sleep_hours,
            notes,
            logged_at,
        }
    }

    // Validation helper methods

    /// Validate a 1-5 rating level
    fn validate_level(what: &str, level: u8) -> Result<(), DomainError> {
        if !(1..=5).contains(&level) {
            return Err(DomainError::InvalidValue {
                message: format!("{} level must be between 1 and 5", what),
            });
        }
        Ok(())
    }

    /// Validate the sleep hours field
    fn validate_sleep_hours(sleep_hours: f64) -> Result<(), DomainError> {
        if !sleep_hours.is_finite() || !(0.0..=24.0).contains(&sleep_hours) {
            return Err(DomainError::InvalidValue {
                message: "Sleep hours must be between 0 and 24".to_string(),
            });
        }
        Ok(())
    }
}
