//! Integration tests for the lift binary.
//!
//! These tests verify end-to-end behavior including:
//! - Routine activation and the day pointer
//! - The session workflow and streak updates
//! - Rejected operations and exit codes
//! - Export and reset

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("lift"))
}

/// CLI pointed at a data directory, with the config read from inside it
/// so the user's own config never leaks into a test
fn cli_in(data_dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir")
        .arg(data_dir)
        .arg("--config")
        .arg(data_dir.join("config.toml"));
    cmd
}

/// Run a subcommand against a data directory
fn lift(data_dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    cli_in(data_dir).args(args).assert()
}

/// Pull the exercise id out of `add-exercise` output
fn exercise_id(output: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(output);
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("Exercise id: "))
        .expect("exercise id in output")
        .to_string()
}

fn log_squat(data_dir: &Path) {
    let output = lift(data_dir, &["add-exercise", "Squat"]).success().get_output().stdout.clone();
    let id = exercise_id(&output);
    lift(data_dir, &["add-set", &id, "5", "100"]).success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout routine and session tracker"));
}

#[test]
fn test_premade_routines_listed() {
    let temp_dir = setup_test_dir();

    lift(temp_dir.path(), &["routines"])
        .success()
        .stdout(predicate::str::contains("Bro Split"))
        .stdout(predicate::str::contains("Push / Pull / Legs"))
        .stdout(predicate::str::contains("Upper / Lower"))
        .stdout(predicate::str::contains("Full Body"));

    // Running again does not duplicate the catalog
    let output = lift(temp_dir.path(), &["routines"]).success().get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&output);
    assert_eq!(stdout.matches("Bro Split").count(), 1);
}

#[test]
fn test_default_command_without_routine() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No active routine"));
}

#[test]
fn test_full_body_workflow() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-4"])
        .success()
        .stdout(predicate::str::contains("Full Body"));
    lift(data_dir, &["today"])
        .success()
        .stdout(predicate::str::contains("Today: Full Body"));

    lift(data_dir, &["start"]).success();
    log_squat(data_dir);
    lift(data_dir, &["end"])
        .success()
        .stdout(predicate::str::contains("Streak: 1 (best 1)"));

    lift(data_dir, &["today"])
        .success()
        .stdout(predicate::str::contains("Today: Rest (rest day)"));
    lift(data_dir, &["history"])
        .success()
        .stdout(predicate::str::contains("Squat"));
}

#[test]
fn test_start_without_routine_is_rejected() {
    let temp_dir = setup_test_dir();

    lift(temp_dir.path(), &["start"])
        .code(2)
        .stderr(predicate::str::contains("No active routine"));
}

#[test]
fn test_end_without_sets_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-1"]).success();
    lift(data_dir, &["start"]).success();
    lift(data_dir, &["end"])
        .code(2)
        .stderr(predicate::str::contains("No exercises logged"));

    // Session is still open
    lift(data_dir, &["status"])
        .success()
        .stdout(predicate::str::contains("No exercises yet"));
}

#[test]
fn test_invalid_set_input_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-2"]).success();
    lift(data_dir, &["start"]).success();
    let output = lift(data_dir, &["add-exercise", "Rows"]).success().get_output().stdout.clone();
    let id = exercise_id(&output);

    lift(data_dir, &["add-set", &id, "ten", "40"])
        .code(2)
        .stderr(predicate::str::contains("Invalid reps"));
    lift(data_dir, &["add-set", "no-such-id", "10", "40"])
        .code(2)
        .stderr(predicate::str::contains("Exercise not found"));
}

#[test]
fn test_undo_set() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-3"]).success();
    lift(data_dir, &["start"]).success();
    let output = lift(data_dir, &["add-exercise", "Bench Press"])
        .success()
        .get_output()
        .stdout
        .clone();
    let id = exercise_id(&output);
    lift(data_dir, &["add-set", &id, "10", "50"]).success();
    lift(data_dir, &["add-set", &id, "8", "55"]).success();

    lift(data_dir, &["undo-set", &id])
        .success()
        .stdout(predicate::str::contains("8 x 55"));
    lift(data_dir, &["status"])
        .success()
        .stdout(predicate::str::contains("1. 10 x 50"))
        .stdout(predicate::str::contains("8 x 55").not());
}

#[test]
fn test_skip_training_day_and_rest_day() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-4"]).success();
    lift(data_dir, &["skip"])
        .success()
        .stdout(predicate::str::contains("Next: Rest"));

    lift(data_dir, &["skip"])
        .code(2)
        .stderr(predicate::str::contains("rest day"));
    lift(data_dir, &["today"])
        .success()
        .stdout(predicate::str::contains("Today: Rest"));
}

#[test]
fn test_last_performance_shown() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-1"]).success();
    lift(data_dir, &["start"]).success();
    log_squat(data_dir);
    lift(data_dir, &["end"]).success();

    lift(data_dir, &["start"]).success();
    lift(data_dir, &["add-exercise", "Squat"])
        .success()
        .stdout(predicate::str::contains("Last time:"))
        .stdout(predicate::str::contains("1. 5 x 100"));
}

#[test]
fn test_custom_routine() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let output = lift(
        data_dir,
        &["create-routine", "--name", "Minimal", "--day", "Lift", "--day", "Active Rest"],
    )
    .success()
    .get_output()
    .stdout
    .clone();
    let stdout = String::from_utf8_lossy(&output);
    let id = stdout
        .split('(')
        .nth(1)
        .and_then(|s| s.split(')').next())
        .expect("routine id")
        .to_string();

    lift(data_dir, &["activate", &id]).success();
    lift(data_dir, &["skip"]).success();
    lift(data_dir, &["today"])
        .success()
        .stdout(predicate::str::contains("Active Rest (rest day)"));

    lift(data_dir, &["delete-routine", &id]).success();
    lift(data_dir, &["delete-routine", "premade-1"]).code(2);
}

#[test]
fn test_export_snapshot() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let out = data_dir.join("export.json");

    lift(data_dir, &["init", "--name", "Sam", "--age", "30", "--height", "180", "--weight", "80"])
        .success();
    lift(data_dir, &["activate", "premade-4"]).success();
    lift(data_dir, &["start"]).success();
    log_squat(data_dir);
    lift(data_dir, &["end"]).success();

    lift(data_dir, &["export", "--out", out.to_str().unwrap()]).success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["user"]["name"], "Sam");
    assert_eq!(json["activeRoutineId"], "premade-4");
    assert_eq!(json["currentRoutineDayIndex"], 1);
    assert!(json["workoutSession"].is_null());
    assert_eq!(json["completedWorkouts"].as_array().unwrap().len(), 1);
    assert_eq!(json["streak"]["current"], 1);
}

#[test]
fn test_export_uses_configured_file_name() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::write(data_dir.join("config.toml"), "[export]\nfile_name = \"custom.json\"\n").unwrap();

    lift(data_dir, &["activate", "premade-2"]).success();
    lift(data_dir, &["export"]).success();

    assert!(data_dir.join("custom.json").exists());
    assert!(!data_dir.join("workout-data.json").exists());
}

#[test]
fn test_invalid_config_is_a_fault() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::write(data_dir.join("config.toml"), "[export]\nfile_name = \"\"\n").unwrap();

    lift(data_dir, &["today"])
        .code(1)
        .stderr(predicate::str::contains("export.file_name"));
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-4"]).success();
    lift(data_dir, &["start"]).success();
    log_squat(data_dir);
    lift(data_dir, &["end"]).success();

    lift(data_dir, &["export", "--csv"])
        .success()
        .stdout(predicate::str::contains("Exported 1 sets"));
    let csv = fs::read_to_string(data_dir.join("history.csv")).unwrap();
    assert!(csv.contains("Squat"));
}

#[test]
fn test_reset_requires_confirmation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    lift(data_dir, &["activate", "premade-4"]).success();

    lift(data_dir, &["reset"])
        .success()
        .stdout(predicate::str::contains("--yes"));
    lift(data_dir, &["today"])
        .success()
        .stdout(predicate::str::contains("Full Body"));

    lift(data_dir, &["reset", "--yes"]).success();
    lift(data_dir, &["today"])
        .success()
        .stdout(predicate::str::contains("No active routine"));
}
