//! Core domain types for the Lift workout tracker.
//!
//! This module defines the records persisted in the key-value store:
//! - User profile captured at onboarding
//! - Routines and their days
//! - Workout sessions, logged exercises and sets
//! - The streak counter
//!
//! Records serialize with camelCase field names so data exported by earlier
//! versions of the tracker loads unchanged. Every field has a default, so a
//! record missing fields loads rather than failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// User Profile
// ============================================================================

/// Profile captured once at onboarding. Opaque to the session logic.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub height: f64,
    pub weight: f64,
}

// ============================================================================
// Routine Types
// ============================================================================

/// One slot in a routine's cycle
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Day {
    pub day_index: usize,
    pub label: String,
}

impl Day {
    pub fn new(day_index: usize, label: impl Into<String>) -> Self {
        Self {
            day_index,
            label: label.into(),
        }
    }

    /// A rest day is any day whose label contains "rest", ignoring case.
    pub fn is_rest(&self) -> bool {
        self.label.to_lowercase().contains("rest")
    }
}

/// A named, ordered cycle of training days
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub days: Vec<Day>,
    pub is_premade: bool,
}

impl Routine {
    /// Build a user-defined routine from day labels, indexed in order.
    pub fn new<I, L>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            days: labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| Day::new(i, label))
                .collect(),
            is_premade: false,
        }
    }

    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// Lifecycle status of a workout session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

/// One logged set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct WorkoutSet {
    #[serde(deserialize_with = "null_as_default")]
    pub reps: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
}

// Older exports wrote unparseable numbers as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl WorkoutSet {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self { reps, weight }
    }
}

/// An exercise logged inside a session
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggedExercise {
    pub id: String,
    pub name: String,
    pub sets: Vec<WorkoutSet>,
}

impl LoggedExercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            sets: Vec::new(),
        }
    }
}

/// A workout session, active or archived
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub routine_id: String,
    pub routine_day_index: usize,
    pub status: SessionStatus,
    pub exercises: Vec<LoggedExercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkoutSession {
    /// Open a session against a routine day. The id is the start time in
    /// milliseconds since the epoch.
    pub fn start(routine_id: impl Into<String>, routine_day_index: usize, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            routine_id: routine_id.into(),
            routine_day_index,
            status: SessionStatus::Active,
            exercises: Vec::new(),
            started_at: Some(now),
            completed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// At least one exercise carries at least one set
    pub fn has_logged_sets(&self) -> bool {
        self.exercises.iter().any(|e| !e.sets.is_empty())
    }

    pub fn exercise(&self, exercise_id: &str) -> Option<&LoggedExercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    pub fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut LoggedExercise> {
        self.exercises.iter_mut().find(|e| e.id == exercise_id)
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

// ============================================================================
// Streak
// ============================================================================

/// Consecutive-completion counter
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

impl Streak {
    pub fn increment(&mut self) {
        self.current += 1;
        if self.current > self.best {
            self.best = self.current;
        }
    }

    /// Drop the current run. `best` is kept.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}
