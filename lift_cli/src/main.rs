use clap::{Parser, Subcommand};
use lift_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Workout routine and session tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the user profile
    Init {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Body weight in kg
        #[arg(long)]
        weight: f64,
    },

    /// Show the saved profile
    Profile,

    /// List routines
    Routines,

    /// Create a custom routine
    CreateRoutine {
        #[arg(long)]
        name: String,
        /// Day labels in order; a label containing "rest" is a rest day
        #[arg(long = "day", required = true)]
        days: Vec<String>,
    },

    /// Delete a custom routine
    DeleteRoutine { id: String },

    /// Make a routine active, starting from its first day
    Activate { id: String },

    /// Show the current day and streak (default)
    Today,

    /// Start a workout session on the current day
    Start,

    /// Add an exercise to the active session
    AddExercise { name: String },

    /// Log a set
    AddSet {
        exercise_id: String,
        reps: String,
        weight: String,
    },

    /// Remove the last set of an exercise
    UndoSet { exercise_id: String },

    /// Show the active session
    Status,

    /// Finish the active session
    End,

    /// Skip the current training day (resets the streak)
    Skip,

    /// List completed workouts
    History,

    /// Export all data as JSON, or history as CSV
    Export {
        /// Output path (defaults to the configured file name in the data directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Export completed sets as CSV instead of a JSON snapshot
        #[arg(long)]
        csv: bool,
    },

    /// Delete all data
    Reset {
        /// Confirm the irreversible wipe
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    lift_core::logging::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_rejection() => {
            eprintln!("✗ {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_or_default(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    tracing::debug!("Using data directory {:?}", data_dir);

    let mut tracker = Tracker::new(FileStore::open(&data_dir)?);
    tracker.seed_premade_routines()?;

    match cli.command.unwrap_or(Commands::Today) {
        Commands::Init {
            name,
            age,
            height,
            weight,
        } => {
            tracker.save_user_profile(&UserProfile {
                name,
                age,
                height,
                weight,
            })?;
            println!("✓ Profile saved");
        }
        Commands::Profile => match tracker.user_profile()? {
            Some(p) => println!("{} | age {} | {} cm | {} kg", p.name, p.age, p.height, p.weight),
            None => println!("No profile yet. Run `lift init`."),
        },
        Commands::Routines => cmd_routines(&tracker)?,
        Commands::CreateRoutine { name, days } => {
            let routine = Routine::new(name, days);
            tracker.save_routine(&routine)?;
            println!("✓ Created routine {} ({})", routine.name, routine.id);
        }
        Commands::DeleteRoutine { id } => {
            let removed = tracker.delete_routine(&id)?;
            println!("✓ Deleted routine {}", removed.name);
        }
        Commands::Activate { id } => {
            tracker.set_active_routine(&id)?;
            match tracker.active_routine()? {
                Some(routine) => println!("✓ Active routine: {}", routine.name),
                None => println!("✓ Active routine set to {} (not found in stored routines)", id),
            }
        }
        Commands::Today => cmd_today(&tracker)?,
        Commands::Start => {
            let session = tracker.start_session()?;
            let day = tracker.current_day()?;
            println!(
                "✓ Session started: {}",
                day.map(|d| d.label).unwrap_or_else(|| "unknown day".into())
            );
            println!("  Session id: {}", session.id);
        }
        Commands::AddExercise { name } => cmd_add_exercise(&mut tracker, &name, &config)?,
        Commands::AddSet {
            exercise_id,
            reps,
            weight,
        } => {
            tracker.add_set_from_input(&exercise_id, &reps, &weight)?;
            println!("✓ Set logged: {} x {}", reps.trim(), weight.trim());
        }
        Commands::UndoSet { exercise_id } => {
            let set = tracker.delete_last_set(&exercise_id)?;
            println!("✓ Removed set: {} x {}", set.reps, set.weight);
        }
        Commands::Status => cmd_status(&tracker)?,
        Commands::End => {
            let session = tracker.end_session()?;
            let streak = tracker.streak()?;
            println!(
                "✓ Workout complete! {} exercises, {} sets",
                session.exercises.len(),
                session.total_sets()
            );
            println!("  Streak: {} (best {})", streak.current, streak.best);
        }
        Commands::Skip => {
            let streak = tracker.skip_training_day()?;
            println!("✓ Day skipped. Streak reset (best {})", streak.best);
            if let Some(day) = tracker.current_day()? {
                println!("  Next: {}", day.label);
            }
        }
        Commands::History => cmd_history(&tracker)?,
        Commands::Export { out, csv } => {
            if csv {
                let path = out.unwrap_or_else(|| data_dir.join("history.csv"));
                let rows = tracker.export_history_csv(&path)?;
                println!("✓ Exported {} sets to {}", rows, path.display());
            } else {
                let path = out.unwrap_or_else(|| data_dir.join(&config.export.file_name));
                tracker.export_snapshot_to(&path)?;
                println!("✓ Exported data to {}", path.display());
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                println!("This will delete all data. Re-run with --yes to continue.");
                return Ok(());
            }
            tracker.reset_all()?;
            println!("✓ All data deleted");
        }
    }

    Ok(())
}

fn cmd_routines<S: KeyValueStore>(tracker: &Tracker<S>) -> Result<()> {
    let active = tracker.active_routine_id()?;
    for routine in tracker.list_routines()? {
        let marker = if active.as_deref() == Some(routine.id.as_str()) {
            "*"
        } else {
            " "
        };
        let labels: Vec<_> = routine.days.iter().map(|d| d.label.as_str()).collect();
        println!(
            "{} {:<12} {}{}  [{}]",
            marker,
            routine.id,
            routine.name,
            if routine.is_premade { " (premade)" } else { "" },
            labels.join(", ")
        );
    }
    Ok(())
}

fn cmd_today<S: KeyValueStore>(tracker: &Tracker<S>) -> Result<()> {
    let streak = tracker.streak()?;
    match (tracker.active_routine()?, tracker.current_day()?) {
        (Some(routine), Some(day)) => {
            println!("{}: day {} of {}", routine.name, day.day_index + 1, routine.days.len());
            if day.is_rest() {
                println!("  Today: {} (rest day)", day.label);
            } else {
                println!("  Today: {}", day.label);
            }
        }
        _ => println!("No active routine. Pick one with `lift activate <id>`."),
    }
    println!("  Streak: {} (best {})", streak.current, streak.best);
    if tracker.active_session()?.is_some_and(|s| s.is_active()) {
        println!("  A session is in progress (`lift status`).");
    }
    Ok(())
}

fn cmd_add_exercise<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    name: &str,
    config: &Config,
) -> Result<()> {
    let id = tracker.add_exercise(name)?;
    println!("✓ Added {}", name);
    println!("  Exercise id: {}", id);

    if !config.exercises.presets.iter().any(|p| p == name) {
        println!("  (custom exercise)");
    }

    if let Some(sets) = tracker.last_sets_for_exercise(name)? {
        println!("  Last time:");
        for (i, set) in sets.iter().enumerate() {
            println!("    {}. {} x {}", i + 1, set.reps, set.weight);
        }
    }
    Ok(())
}

fn cmd_status<S: KeyValueStore>(tracker: &Tracker<S>) -> Result<()> {
    let Some(session) = tracker.active_session()?.filter(|s| s.is_active()) else {
        println!("No active session.");
        return Ok(());
    };

    println!("Session {} (routine {}, day {})", session.id, session.routine_id, session.routine_day_index + 1);
    if session.exercises.is_empty() {
        println!("  No exercises yet.");
    }
    for exercise in &session.exercises {
        println!("  {} [{}]", exercise.name, exercise.id);
        for (i, set) in exercise.sets.iter().enumerate() {
            println!("    {}. {} x {}", i + 1, set.reps, set.weight);
        }
    }
    Ok(())
}

fn cmd_history<S: KeyValueStore>(tracker: &Tracker<S>) -> Result<()> {
    let workouts = tracker.completed_workouts()?;
    if workouts.is_empty() {
        println!("No completed workouts yet.");
        return Ok(());
    }

    for workout in workouts.iter().rev() {
        let when = workout
            .completed_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| workout.id.clone());
        let names: Vec<_> = workout.exercises.iter().map(|e| e.name.as_str()).collect();
        println!("{}  {} sets  {}", when, workout.total_sets(), names.join(", "));
    }
    Ok(())
}
