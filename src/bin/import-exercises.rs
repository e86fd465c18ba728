// ABOUTME: Bulk exercise catalog importer from a CSV file
// ABOUTME: Inserts rows whose name is not already present, skipping and logging invalid ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! # Exercise Catalog Importer
//!
//! Reads a CSV file with columns `name, description, instructions,
//! target_muscles, difficulty` and inserts each row into the exercise
//! catalog unless an exercise with that name (case-insensitive) already
//! exists. Rows with a difficulty outside 1..=3 are skipped and logged.
//!
//! This runs as a standalone process against the database; it never
//! participates in a request transaction.
//!
//! Usage:
//! ```bash
//! cargo run --bin import-exercises -- --file exercises.csv
//! cargo run --bin import-exercises -- --file exercises.csv --database-url sqlite:workout.db
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing::{info, warn};
use workout_tracker::database::exercises::NewExercise;
use workout_tracker::database::Database;
use workout_tracker::logging;

#[derive(Parser)]
#[command(
    name = "import-exercises",
    about = "Load the exercise catalog from a CSV file"
)]
struct ImportArgs {
    /// Path to the CSV file
    #[arg(long, default_value = "exercises.csv")]
    file: String,

    /// Database URL override (defaults to DATABASE_URL or sqlite:workout.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;
    let args = ImportArgs::parse();

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:workout.db".into());

    let database = Database::new(&database_url).await?;

    let mut reader = csv::Reader::from_path(&args.file)
        .with_context(|| format!("Failed to open {}", args.file))?;

    let mut imported = 0usize;
    let mut skipped = 0usize;

    for record in reader.deserialize::<NewExercise>() {
        let exercise = match record {
            Ok(exercise) => exercise,
            Err(e) => {
                warn!("Skipping malformed row: {e}");
                skipped += 1;
                continue;
            }
        };

        if !(1..=3).contains(&exercise.difficulty) {
            warn!(
                "Skipping \"{}\": difficulty {} is outside 1..=3",
                exercise.name, exercise.difficulty
            );
            skipped += 1;
            continue;
        }

        if database
            .get_exercise_by_name(&exercise.name)
            .await?
            .is_some()
        {
            info!("Skipping \"{}\": already in catalog", exercise.name);
            skipped += 1;
            continue;
        }

        database.insert_exercise(&exercise).await?;
        imported += 1;
    }

    info!(
        "Catalog import complete: {imported} imported, {skipped} skipped from {}",
        args.file
    );
    Ok(())
}
