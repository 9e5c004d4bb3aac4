//! Routine registry: stored routines, the active routine and its day pointer.

use crate::catalog::premade_routines;
use crate::store::{keys, KeyValueStore};
use crate::{Day, Error, Result, Routine, Tracker};

impl<S: KeyValueStore> Tracker<S> {
    /// All stored routines, user-defined and premade, in storage order
    pub fn list_routines(&self) -> Result<Vec<Routine>> {
        Ok(self.read_json(keys::ROUTINES)?.unwrap_or_default())
    }

    fn write_routines(&mut self, routines: &[Routine]) -> Result<()> {
        self.write_json(keys::ROUTINES, routines)
    }

    /// Upsert by id: replace the matching entry in place, else append
    pub fn save_routine(&mut self, routine: &Routine) -> Result<()> {
        let mut routines = self.list_routines()?;
        match routines.iter_mut().find(|r| r.id == routine.id) {
            Some(existing) => {
                *existing = routine.clone();
                tracing::debug!("Replaced routine {}", routine.id);
            }
            None => {
                routines.push(routine.clone());
                tracing::debug!("Added routine {}", routine.id);
            }
        }
        self.write_routines(&routines)
    }

    /// Remove a user-defined routine.
    ///
    /// Premade routines are refused so that seeding stays a one-time event.
    /// If the removed routine was active, the active pointer is cleared.
    pub fn delete_routine(&mut self, id: &str) -> Result<Routine> {
        let mut routines = self.list_routines()?;
        let position = routines
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::RoutineNotFound(id.to_string()))?;

        if routines[position].is_premade {
            return Err(Error::PremadeRoutine(id.to_string()));
        }

        let removed = routines.remove(position);
        self.write_routines(&routines)?;

        if self.active_routine_id()?.as_deref() == Some(id) {
            self.remove_key(keys::ACTIVE_ROUTINE_ID)?;
            self.remove_key(keys::CURRENT_DAY_INDEX)?;
        }

        tracing::info!("Deleted routine {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Append the premade catalog unless a premade routine is already stored.
    ///
    /// Safe to call on every startup. Returns whether anything was added.
    pub fn seed_premade_routines(&mut self) -> Result<bool> {
        let mut routines = self.list_routines()?;
        if routines.iter().any(|r| r.is_premade) {
            return Ok(false);
        }

        routines.extend(premade_routines().iter().cloned());
        self.write_routines(&routines)?;
        tracing::info!("Seeded {} premade routines", premade_routines().len());
        Ok(true)
    }

    pub fn active_routine_id(&self) -> Result<Option<String>> {
        self.read_text(keys::ACTIVE_ROUTINE_ID)
    }

    /// Select a routine and rewind to its first day.
    ///
    /// The id is not checked against stored routines; an unknown id makes
    /// later lookups resolve to nothing.
    pub fn set_active_routine(&mut self, id: &str) -> Result<()> {
        self.write_text(keys::ACTIVE_ROUTINE_ID, id)?;
        self.set_current_day_index(0)?;
        tracing::info!("Active routine set to {}", id);
        Ok(())
    }

    /// Current-day pointer; 0 when unset or unreadable
    pub fn current_day_index(&self) -> Result<usize> {
        let raw = self.read_text(keys::CURRENT_DAY_INDEX)?;
        Ok(match raw {
            Some(text) => text.trim().parse::<usize>().unwrap_or_else(|e| {
                tracing::warn!("Invalid stored day index {:?}: {}. Using 0.", text, e);
                0
            }),
            None => 0,
        })
    }

    fn set_current_day_index(&mut self, index: usize) -> Result<()> {
        self.write_text(keys::CURRENT_DAY_INDEX, &index.to_string())
    }

    /// Resolve a routine by id
    pub fn routine(&self, id: &str) -> Result<Option<Routine>> {
        Ok(self.list_routines()?.into_iter().find(|r| r.id == id))
    }

    /// The active routine record, if one is selected and still stored
    pub fn active_routine(&self) -> Result<Option<Routine>> {
        match self.active_routine_id()? {
            Some(id) => self.routine(&id),
            None => Ok(None),
        }
    }

    /// The day the pointer is on, or `None` when nothing resolves
    pub fn current_day(&self) -> Result<Option<Day>> {
        let Some(routine) = self.active_routine()? else {
            return Ok(None);
        };
        let index = self.current_day_index()?;
        Ok(routine.day(index).cloned())
    }

    /// Move the pointer to the next day, wrapping after the last.
    ///
    /// No-op when there is no active routine or it has no days. Returns the
    /// new index when the pointer moved.
    pub fn advance_day(&mut self) -> Result<Option<usize>> {
        let Some(routine) = self.active_routine()? else {
            return Ok(None);
        };
        if routine.days.is_empty() {
            return Ok(None);
        }

        // Stored index may be past the end if the routine was edited
        let len = routine.days.len();
        let next = (self.current_day_index()? % len + 1) % len;
        self.set_current_day_index(next)?;
        tracing::debug!("Advanced {} to day {}", routine.id, next);
        Ok(Some(next))
    }
}
