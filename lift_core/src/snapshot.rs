//! Whole-store export.

use crate::store::KeyValueStore;
use crate::{Result, Routine, Streak, Tracker, UserProfile, WorkoutSession};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the tracker knows, in one record
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub user: Option<UserProfile>,
    pub routines: Vec<Routine>,
    pub active_routine_id: Option<String>,
    pub current_routine_day_index: usize,
    pub workout_session: Option<WorkoutSession>,
    pub completed_workouts: Vec<WorkoutSession>,
    pub streak: Streak,
}

impl Snapshot {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            user: self.user_profile()?,
            routines: self.list_routines()?,
            active_routine_id: self.active_routine_id()?,
            current_routine_day_index: self.current_day_index()?,
            workout_session: self.active_session()?,
            completed_workouts: self.completed_workouts()?,
            streak: self.streak()?,
        })
    }

    /// Write the snapshot as pretty JSON to `path`
    pub fn export_snapshot_to(&self, path: &Path) -> Result<Snapshot> {
        let snapshot = self.export_snapshot()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, snapshot.to_json_pretty()?)?;

        tracing::info!(
            "Exported snapshot ({} routines, {} workouts) to {:?}",
            snapshot.routines.len(),
            snapshot.completed_workouts.len(),
            path
        );
        Ok(snapshot)
    }
}
