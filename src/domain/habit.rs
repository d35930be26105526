/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents something the
/// user wants to do regularly, along with its validation rules.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, HabitId};

/// Default accent color used by clients when none is provided
pub const DEFAULT_COLOR: &str = "#3f8cff";
/// Default icon name used by clients when none is provided
pub const DEFAULT_ICON: &str = "checkmark-circle";

/// A habit represents something the user wants to do regularly
///
/// Each habit has a name, an optional description, a weekly target and a
/// couple of presentation hints (color, icon) that clients may use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Meditate")
    pub name: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// How many completions per week the user is aiming for
    pub target_per_week: u32,
    /// Accent color hint for clients (hex string)
    pub color: String,
    /// Icon name hint for clients
    pub icon: String,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// Missing color/icon fall back to the client defaults.
    pub fn new(
        name: String,
        description: Option<String>,
        target_per_week: u32,
        color: Option<String>,
        icon: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_description(&description)?;
        Self::validate_target(target_per_week)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            description,
            target_per_week,
            color: color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: Utc::now(),
        })
    }

    /// Create a habit from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer.
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: Option<String>,
        target_per_week: u32,
        color: String,
        icon: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            target_per_week,
            color,
            icon,
            created_at,
        }
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    /// Validate optional description
    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.len() > 500 {
                return Err(DomainError::Validation {
                    message: "Description cannot be longer than 500 characters".to_string()
                });
            }
        }
        Ok(())
    }

    /// Validate the weekly target
    fn validate_target(target_per_week: u32) -> Result<(), DomainError> {
        // 70 = ten completions per day, a generous ceiling
        if target_per_week > 70 {
            return Err(DomainError::InvalidValue {
                message: "Weekly target cannot exceed 70".to_string()
            });
        }
        Ok(())
    }
}
