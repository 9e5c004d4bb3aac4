//! Built-in routines and exercise presets.

use crate::types::{Day, Routine};
use once_cell::sync::Lazy;

/// Cached premade routines - built once and cloned when seeding
static PREMADE_ROUTINES: Lazy<Vec<Routine>> = Lazy::new(build_premade_routines);

/// Exercise names offered when logging
const PREMADE_EXERCISES: &[&str] = &[
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
    "Pull-ups",
    "Rows",
];

/// The fixed catalog of premade routines, in seeding order
pub fn premade_routines() -> &'static [Routine] {
    &PREMADE_ROUTINES
}

pub fn premade_exercises() -> &'static [&'static str] {
    PREMADE_EXERCISES
}

fn premade(id: &str, name: &str, labels: &[&str]) -> Routine {
    Routine {
        id: id.into(),
        name: name.into(),
        days: labels
            .iter()
            .enumerate()
            .map(|(i, label)| Day::new(i, *label))
            .collect(),
        is_premade: true,
    }
}

fn build_premade_routines() -> Vec<Routine> {
    vec![
        premade(
            "premade-1",
            "Bro Split",
            &["Chest", "Back", "Shoulders", "Arms", "Legs", "Rest"],
        ),
        premade("premade-2", "Push / Pull / Legs", &["Push", "Pull", "Legs", "Rest"]),
        premade("premade-3", "Upper / Lower", &["Upper", "Lower", "Rest"]),
        premade("premade-4", "Full Body", &["Full Body", "Rest"]),
    ]
}
