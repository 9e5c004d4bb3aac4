//! Error types for the lift_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lift_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store error
    #[error("Store error: {0}")]
    Store(String),

    /// A session was requested but no routine is active
    #[error("No active routine")]
    NoActiveRoutine,

    /// A session is already in progress
    #[error("A workout session is already active")]
    SessionAlreadyActive,

    /// The operation needs an active session
    #[error("No active workout session")]
    NoActiveSession,

    /// Unknown exercise id within the active session
    #[error("Exercise not found: {0}")]
    ExerciseNotFound(String),

    /// Unknown routine id
    #[error("Routine not found: {0}")]
    RoutineNotFound(String),

    /// Premade routines cannot be deleted
    #[error("Premade routine cannot be deleted: {0}")]
    PremadeRoutine(String),

    /// Undo requested on an exercise with no sets
    #[error("Exercise {0} has no sets")]
    NoSets(String),

    /// Ending a session that has no logged sets
    #[error("No exercises logged")]
    NoExercisesLogged,

    /// No current routine day resolves
    #[error("No current routine day")]
    NoCurrentDay,

    /// Skipping is not allowed on a rest day
    #[error("Current day is a rest day")]
    RestDay,

    /// Reps or weight input did not parse
    #[error("Invalid {field}: {input:?}")]
    InvalidNumber { field: &'static str, input: String },
}

impl Error {
    /// True for precondition violations and missing references.
    ///
    /// These leave stored state untouched and are reported back to the
    /// caller rather than treated as faults.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::NoActiveRoutine
                | Error::SessionAlreadyActive
                | Error::NoActiveSession
                | Error::ExerciseNotFound(_)
                | Error::RoutineNotFound(_)
                | Error::PremadeRoutine(_)
                | Error::NoSets(_)
                | Error::NoExercisesLogged
                | Error::NoCurrentDay
                | Error::RestDay
                | Error::InvalidNumber { .. }
        )
    }
}
