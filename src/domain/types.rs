/// Core identifier types used throughout the domain layer
///
/// Each record kind gets its own UUID wrapper for type safety - you can't
/// accidentally pass a habit ID where a focus session ID is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an identifier from a string (useful for database loading)
            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type! {
    /// Unique identifier for a habit
    HabitId
}

id_type! {
    /// Unique identifier for a habit log (one completion record per day)
    LogId
}

id_type! {
    /// Unique identifier for a daily mood entry
    MoodId
}

id_type! {
    /// Unique identifier for a focus session
    SessionId
}
