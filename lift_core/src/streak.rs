//! Streak tracker and the day-skip operation.

use crate::store::{keys, KeyValueStore};
use crate::{Error, Result, Streak, Tracker};

impl<S: KeyValueStore> Tracker<S> {
    pub fn streak(&self) -> Result<Streak> {
        Ok(self.read_json(keys::STREAK)?.unwrap_or_default())
    }

    fn update_streak<F>(&mut self, f: F) -> Result<Streak>
    where
        F: FnOnce(&mut Streak),
    {
        let mut streak = self.streak()?;
        f(&mut streak);
        self.write_json(keys::STREAK, &streak)?;
        Ok(streak)
    }

    pub fn increment_streak(&mut self) -> Result<Streak> {
        let streak = self.update_streak(Streak::increment)?;
        tracing::info!("Streak now {} (best {})", streak.current, streak.best);
        Ok(streak)
    }

    pub fn reset_streak(&mut self) -> Result<Streak> {
        let streak = self.update_streak(Streak::reset)?;
        tracing::info!("Streak reset (best {})", streak.best);
        Ok(streak)
    }

    /// Skip the current training day: resets the streak and advances the
    /// day pointer.
    ///
    /// Rejected when no day resolves or the current day is a rest day; in
    /// both cases nothing changes.
    pub fn skip_training_day(&mut self) -> Result<Streak> {
        let day = self.current_day()?.ok_or(Error::NoCurrentDay)?;
        if day.is_rest() {
            tracing::warn!("Refusing to skip rest day {:?}", day.label);
            return Err(Error::RestDay);
        }

        let streak = self.reset_streak()?;
        self.advance_day()?;
        tracing::info!("Skipped {}", day.label);
        Ok(streak)
    }
}
