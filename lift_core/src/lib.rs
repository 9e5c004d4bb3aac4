#![forbid(unsafe_code)]

//! Core state manager for the Lift workout tracker.
//!
//! This crate provides:
//! - Domain types (routines, days, sessions, sets, streak)
//! - Key-value store adapters (in-memory and file-backed)
//! - The routine registry, session state machine, streak tracker and
//!   history ledger, all as operations on [`Tracker`]
//! - Snapshot export and CSV history export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod tracker;
pub mod routine;
pub mod session;
pub mod streak;
pub mod history;
pub mod snapshot;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{premade_exercises, premade_routines};
pub use config::Config;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tracker::Tracker;
pub use session::{parse_reps, parse_weight};
pub use history::find_last_sets;
pub use snapshot::Snapshot;
