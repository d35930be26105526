/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, HabitLog, MoodEntry,
/// FocusSession) and their validation rules. These types represent the
/// fundamental concepts in our wellness tracking system.

pub mod habit;
pub mod log;
pub mod mood;
pub mod focus;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use log::*;
pub use mood::*;
pub use focus::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
