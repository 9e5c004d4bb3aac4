//! History ledger of completed workouts.
//!
//! Completed sessions are appended in completion order and never rewritten.
//! The ledger answers "what did I do last time" lookups and can be flattened
//! to CSV, one row per set.

use crate::store::{keys, KeyValueStore};
use crate::{Result, Tracker, WorkoutSession, WorkoutSet};
use std::path::Path;

/// A row in the CSV export
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    session_id: &'a str,
    completed_at: Option<String>,
    routine_id: &'a str,
    day_index: usize,
    exercise: &'a str,
    set_number: usize,
    reps: u32,
    weight: f64,
}

/// Find the sets of the most recent exercise named exactly `name`.
///
/// Scans newest to oldest; exercises logged without sets are passed over.
pub fn find_last_sets<'a>(workouts: &'a [WorkoutSession], name: &str) -> Option<&'a [WorkoutSet]> {
    workouts.iter().rev().find_map(|workout| {
        workout
            .exercises
            .iter()
            .find(|e| e.name == name)
            .filter(|e| !e.sets.is_empty())
            .map(|e| e.sets.as_slice())
    })
}

impl<S: KeyValueStore> Tracker<S> {
    /// Every completed workout in the order they were finished
    pub fn completed_workouts(&self) -> Result<Vec<WorkoutSession>> {
        Ok(self.read_json(keys::COMPLETED_WORKOUTS)?.unwrap_or_default())
    }

    /// Append a session to the ledger. No dedup, no size bound.
    pub fn append_history(&mut self, session: &WorkoutSession) -> Result<()> {
        let mut workouts = self.completed_workouts()?;
        workouts.push(session.clone());
        self.write_json(keys::COMPLETED_WORKOUTS, &workouts)?;
        tracing::debug!("Appended session {} to history ({} total)", session.id, workouts.len());
        Ok(())
    }

    /// Previous performance for an exercise, used to pre-fill a new log
    pub fn last_sets_for_exercise(&self, name: &str) -> Result<Option<Vec<WorkoutSet>>> {
        let workouts = self.completed_workouts()?;
        Ok(find_last_sets(&workouts, name).map(<[WorkoutSet]>::to_vec))
    }

    /// Write the ledger to `path` as CSV, one row per set. Returns the row
    /// count.
    pub fn export_history_csv(&self, path: &Path) -> Result<usize> {
        let workouts = self.completed_workouts()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
        let mut rows = 0;

        for workout in &workouts {
            let completed_at = workout.completed_at.map(|t| t.to_rfc3339());
            for exercise in &workout.exercises {
                for (i, set) in exercise.sets.iter().enumerate() {
                    writer.serialize(CsvRow {
                        session_id: &workout.id,
                        completed_at: completed_at.clone(),
                        routine_id: &workout.routine_id,
                        day_index: workout.routine_day_index,
                        exercise: &exercise.name,
                        set_number: i + 1,
                        reps: set.reps,
                        weight: set.weight,
                    })?;
                    rows += 1;
                }
            }
        }

        writer.flush()?;
        tracing::info!("Exported {} sets from {} workouts to {:?}", rows, workouts.len(), path);
        Ok(rows)
    }
}
