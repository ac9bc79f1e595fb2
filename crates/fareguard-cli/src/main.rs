use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use fareguard_booking::{
    BookingPolicy, BookingValidator, PermissiveSessions, SessionLookup, SessionSnapshot,
};
use fareguard_core::Error as CoreError;

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid policy file: {0}")]
    Policy(#[from] toml::de::Error),
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
}

#[derive(Parser, Debug)]
#[command(name = "fareguard", version, about = "Fareguard booking request validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Path to the booking request payload JSON.
    payload: PathBuf,
    /// Optional TOML file overriding the booking policy constants.
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Optional JSON snapshot mapping sessionId to routeId; without it
    /// every session is accepted.
    #[arg(long)]
    sessions: Option<PathBuf>,
    /// Evaluate passenger ages against this date instead of today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => match run_validate(&args) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(err) => {
                error!("{err}");
                ExitCode::from(2)
            }
        },
    }
}

fn run_validate(args: &ValidateArgs) -> Result<bool, CliError> {
    let run_id = Uuid::new_v4();
    info!(%run_id, payload = %args.payload.display(), "validating booking request");

    let payload: serde_json::Value = serde_json::from_str(&fs::read_to_string(&args.payload)?)?;

    let policy = match &args.policy {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => BookingPolicy::default(),
    };

    let sessions: Arc<dyn SessionLookup> = match &args.sessions {
        Some(path) => {
            let routes: HashMap<String, String> =
                serde_json::from_str(&fs::read_to_string(path)?)?;
            Arc::new(SessionSnapshot::from_map(routes))
        }
        None => Arc::new(PermissiveSessions),
    };

    let today = match &args.today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?,
        None => Utc::now().date_naive(),
    };

    let validator = BookingValidator::new(policy, sessions, today)?;
    match validator.check(&payload) {
        Ok(()) => {
            info!(%run_id, "payload accepted");
            println!("payload is valid");
            Ok(true)
        }
        Err(envelope) => {
            info!(
                %run_id,
                fields = envelope.errors.len(),
                status = envelope.status(),
                "payload rejected"
            );
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(false)
        }
    }
}
