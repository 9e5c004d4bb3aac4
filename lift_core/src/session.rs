//! Workout session lifecycle.
//!
//! ```text
//! NoSession --start--> Active --end--> Completed (archived, slot cleared)
//! ```
//!
//! At most one session is active. Logging operations (`add_exercise`,
//! `add_set`, `delete_last_set`) are only valid while it is. Ending a
//! session archives it to history, bumps the streak when the session's
//! starting day was a training day, clears the slot and advances the
//! routine's day pointer, in that order.

use crate::store::{keys, KeyValueStore};
use crate::{Error, LoggedExercise, Result, SessionStatus, Tracker, WorkoutSession, WorkoutSet};
use chrono::Utc;

/// Parse a reps field from user input
pub fn parse_reps(input: &str) -> Result<u32> {
    input.trim().parse().map_err(|_| Error::InvalidNumber {
        field: "reps",
        input: input.to_string(),
    })
}

/// Parse a weight field from user input. Must be finite and non-negative.
pub fn parse_weight(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight),
        _ => Err(Error::InvalidNumber {
            field: "weight",
            input: input.to_string(),
        }),
    }
}

impl<S: KeyValueStore> Tracker<S> {
    /// The session in the current slot, if any
    pub fn active_session(&self) -> Result<Option<WorkoutSession>> {
        self.read_json(keys::ACTIVE_SESSION)
    }

    fn require_active_session(&self) -> Result<WorkoutSession> {
        self.active_session()?
            .filter(WorkoutSession::is_active)
            .ok_or(Error::NoActiveSession)
    }

    fn write_session(&mut self, session: &WorkoutSession) -> Result<()> {
        self.write_json(keys::ACTIVE_SESSION, session)
    }

    /// Open a session on the current routine day.
    ///
    /// Needs an active routine and no session already active.
    pub fn start_session(&mut self) -> Result<WorkoutSession> {
        let routine_id = self.active_routine_id()?.ok_or(Error::NoActiveRoutine)?;

        if self.active_session()?.is_some_and(|s| s.is_active()) {
            return Err(Error::SessionAlreadyActive);
        }

        let day_index = self.current_day_index()?;
        let session = WorkoutSession::start(routine_id, day_index, Utc::now());
        self.write_session(&session)?;

        tracing::info!(
            "Started session {} on routine {} day {}",
            session.id,
            session.routine_id,
            day_index
        );
        Ok(session)
    }

    /// Log a new exercise with no sets. Returns its id.
    pub fn add_exercise(&mut self, name: &str) -> Result<String> {
        let mut session = self.require_active_session()?;
        let exercise = LoggedExercise::new(name);
        let id = exercise.id.clone();
        session.exercises.push(exercise);
        self.write_session(&session)?;

        tracing::debug!("Added exercise {} ({}) to session {}", name, id, session.id);
        Ok(id)
    }

    /// Append a set to an exercise in the active session
    pub fn add_set(&mut self, exercise_id: &str, set: WorkoutSet) -> Result<()> {
        let mut session = self.require_active_session()?;
        let exercise = session
            .exercise_mut(exercise_id)
            .ok_or_else(|| Error::ExerciseNotFound(exercise_id.to_string()))?;
        exercise.sets.push(set);
        tracing::debug!(
            "Logged {} x {} for {} (set {})",
            set.reps,
            set.weight,
            exercise.name,
            exercise.sets.len()
        );
        self.write_session(&session)
    }

    /// Parse raw reps/weight text and append the set.
    ///
    /// Unparseable input is rejected before the session is touched.
    pub fn add_set_from_input(&mut self, exercise_id: &str, reps: &str, weight: &str) -> Result<()> {
        let set = WorkoutSet::new(parse_reps(reps)?, parse_weight(weight)?);
        self.add_set(exercise_id, set)
    }

    /// Remove and return the most recently logged set of an exercise
    pub fn delete_last_set(&mut self, exercise_id: &str) -> Result<WorkoutSet> {
        let mut session = self.require_active_session()?;
        let exercise = session
            .exercise_mut(exercise_id)
            .ok_or_else(|| Error::ExerciseNotFound(exercise_id.to_string()))?;
        let removed = exercise
            .sets
            .pop()
            .ok_or_else(|| Error::NoSets(exercise_id.to_string()))?;
        self.write_session(&session)?;
        Ok(removed)
    }

    /// Complete the active session.
    ///
    /// Rejected with [`Error::NoExercisesLogged`] unless some exercise has a
    /// set; the session then stays active. On success the completed record
    /// is returned.
    pub fn end_session(&mut self) -> Result<WorkoutSession> {
        let mut session = self.require_active_session()?;
        if !session.has_logged_sets() {
            tracing::warn!("Refusing to end session {}: no exercises logged", session.id);
            return Err(Error::NoExercisesLogged);
        }

        session.status = SessionStatus::Completed;
        session.completed_at = Some(Utc::now());
        self.append_history(&session)?;

        // The streak follows the day the session was started on
        let start_day = self
            .routine(&session.routine_id)?
            .and_then(|r| r.day(session.routine_day_index).cloned());
        match start_day {
            Some(day) if !day.is_rest() => {
                self.increment_streak()?;
            }
            _ => tracing::debug!("Session {} was not on a training day", session.id),
        }

        self.remove_key(keys::ACTIVE_SESSION)?;
        self.advance_day()?;

        tracing::info!(
            "Completed session {} ({} exercises, {} sets)",
            session.id,
            session.exercises.len(),
            session.total_sets()
        );
        Ok(session)
    }
}
