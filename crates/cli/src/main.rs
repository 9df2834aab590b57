// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use bird_survey::SurveyManager;
use bird_survey_domain::{
    CompletedSurvey, Location, PendingSurvey, SurveyDetails, SurveyIdentifier, SurveyRecord,
    SurveyType, parse_timestamp, validate_prep_time_hours,
};
use bird_survey_persistence::{Persistence, SqlitePersistence};
use clap::{Parser, Subcommand};
use serde::Serialize;
use time::PrimitiveDateTime;
use tracing::info;

/// Bird Survey - manage waterbird survey records from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    ///
    /// Falls back to `DATABASE_URL` only in builds with the `mysql` feature.
    #[cfg_attr(feature = "mysql", arg(long, env = "DATABASE_URL", global = true))]
    #[cfg_attr(not(feature = "mysql"), arg(long, global = true))]
    mysql_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or upgrade the database schema.
    Migrate,
    /// Add a survey location.
    AddLocation {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
    },
    /// List every survey location.
    Locations,
    /// Start a new pending survey.
    Start {
        /// Survey type id or name (e.g. `foraging`).
        #[arg(long)]
        survey_type: SurveyType,
        #[arg(long)]
        location_id: i64,
        #[arg(long)]
        submitted_by: i64,
        /// Start time as `YYYY-MM-DD HH:MM:SS`.
        #[arg(long)]
        start_date: Option<String>,
        /// Hours spent preparing, greater than 0 and at most 24.
        #[arg(long)]
        prep_time_hours: Option<f64>,
        #[arg(long)]
        comments: Option<String>,
        /// Observer name; repeat for several observers.
        #[arg(long = "observer")]
        observers: Vec<String>,
    },
    /// Show one survey with its observations and disturbances.
    Show {
        #[arg(long)]
        survey_id: SurveyIdentifier,
        #[arg(long)]
        survey_type: SurveyType,
    },
    /// List a submitter's pending and completed surveys of one type.
    List {
        #[arg(long)]
        submitted_by: i64,
        #[arg(long)]
        survey_type: SurveyType,
    },
    /// Finish a pending survey.
    Finish {
        #[arg(long)]
        survey_id: SurveyIdentifier,
        #[arg(long)]
        survey_type: SurveyType,
    },
    /// Delete a pending survey and its children.
    Delete {
        #[arg(long)]
        survey_id: SurveyIdentifier,
    },
}

#[derive(Debug, Serialize)]
struct MigrateResponse {
    backend: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    survey_identifier: SurveyIdentifier,
    deleted: bool,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn open_persistence(args: &Args) -> CliResult<(Persistence, &'static str)> {
    if let Some(url) = &args.mysql_url {
        return open_mysql(url);
    }

    if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Ok((SqlitePersistence::new_with_file(db_path)?, "sqlite"))
    } else {
        info!("Using in-memory database");
        Ok((SqlitePersistence::new_in_memory()?, "sqlite"))
    }
}

#[cfg(feature = "mysql")]
fn open_mysql(url: &str) -> CliResult<(Persistence, &'static str)> {
    info!("Using MySQL database");
    Ok((Persistence::new_with_mysql(url)?, "mysql"))
}

#[cfg(not(feature = "mysql"))]
fn open_mysql(_url: &str) -> CliResult<(Persistence, &'static str)> {
    Err("this build has no MySQL support; rebuild with `--features mysql`".into())
}

fn start_survey(
    manager: &mut SurveyManager<Persistence>,
    command: Command,
) -> CliResult<PendingSurvey> {
    let Command::Start {
        survey_type,
        location_id,
        submitted_by,
        start_date,
        prep_time_hours,
        comments,
        observers,
    } = command
    else {
        return Err("expected a start command".into());
    };

    if let Some(hours) = prep_time_hours {
        validate_prep_time_hours(hours)?;
    }
    let start_date: Option<PrimitiveDateTime> =
        start_date.as_deref().map(parse_timestamp).transpose()?;

    let mut details: SurveyDetails = SurveyDetails::new(survey_type, location_id, submitted_by);
    details.start_date = start_date;
    details.prep_time_hours = prep_time_hours;
    details.general_comments = comments;
    details.observers = observers;

    let mut survey: PendingSurvey = PendingSurvey::new(details);
    manager.create(&mut survey)?;
    Ok(survey)
}

/// Runs one command and returns its result as JSON.
fn run(
    manager: &mut SurveyManager<Persistence>,
    backend: &'static str,
    command: Command,
) -> CliResult<serde_json::Value> {
    let value: serde_json::Value = match command {
        Command::Migrate => serde_json::to_value(MigrateResponse {
            backend,
            status: "ok",
        })?,
        Command::AddLocation {
            name,
            latitude,
            longitude,
        } => {
            let mut location: Location = Location::new(name, latitude, longitude);
            location.location_id = Some(manager.store_mut().create_location(&location)?);
            serde_json::to_value(location)?
        }
        Command::Locations => serde_json::to_value(manager.store_mut().list_locations()?)?,
        start @ Command::Start { .. } => serde_json::to_value(start_survey(manager, start)?)?,
        Command::Show {
            survey_id,
            survey_type,
        } => {
            let record: Option<SurveyRecord> = manager.find_by_survey_id(survey_id, survey_type)?;
            serde_json::to_value(record)?
        }
        Command::List {
            submitted_by,
            survey_type,
        } => serde_json::to_value(
            manager.find_by_submitter_id_and_survey_type(submitted_by, survey_type)?,
        )?,
        Command::Finish {
            survey_id,
            survey_type,
        } => {
            let pending: PendingSurvey = manager
                .find_by_survey_id(survey_id, survey_type)?
                .and_then(SurveyRecord::into_pending)
                .ok_or_else(|| format!("No pending survey with identifier {survey_id}"))?;
            let completed: CompletedSurvey = manager.finish(pending)?;
            serde_json::to_value(completed)?
        }
        Command::Delete { survey_id } => serde_json::to_value(DeleteResponse {
            survey_identifier: survey_id,
            deleted: manager.delete(survey_id)?,
        })?,
    };
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (persistence, backend) = open_persistence(&args)?;
    let mut manager: SurveyManager<Persistence> = SurveyManager::new(persistence);

    let output: serde_json::Value = run(&mut manager, backend, args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
