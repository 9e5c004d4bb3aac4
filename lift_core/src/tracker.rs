//! The tracker state container.
//!
//! [`Tracker`] owns a [`KeyValueStore`] and exposes every operation of the
//! routine registry, session manager, streak tracker and history ledger as
//! methods (implemented in their own modules). Each operation reads what it
//! needs from the store, modifies it, and writes it back.
//!
//! Records that fail to parse are logged and replaced by their defaults,
//! the same recovery policy used for a corrupted state file.

use crate::store::{keys, KeyValueStore};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Workout state manager over a key-value store
#[derive(Debug)]
pub struct Tracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a JSON record, or `None` if absent or unreadable
    pub(crate) fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Failed to parse stored {}: {}. Using defaults.", key, e);
                Ok(None)
            }
        }
    }

    pub(crate) fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let contents = serde_json::to_string(value)?;
        self.store.set(key, &contents)
    }

    pub(crate) fn read_text(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.get(key)?.filter(|s| !s.is_empty()))
    }

    pub(crate) fn write_text(&mut self, key: &str, value: &str) -> Result<()> {
        self.store.set(key, value)
    }

    pub(crate) fn remove_key(&mut self, key: &str) -> Result<()> {
        self.store.remove(key)
    }

    /// Irreversibly wipe every key. Confirmation is the caller's job.
    pub fn reset_all(&mut self) -> Result<()> {
        self.store.clear()?;
        tracing::warn!("All tracker data cleared");
        Ok(())
    }

    /// Load the onboarding profile, if one was saved
    pub fn user_profile(&self) -> Result<Option<crate::UserProfile>> {
        self.read_json(keys::USER)
    }

    pub fn save_user_profile(&mut self, profile: &crate::UserProfile) -> Result<()> {
        self.write_json(keys::USER, profile)?;
        tracing::info!("Saved profile for {}", profile.name);
        Ok(())
    }
}
