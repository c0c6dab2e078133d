//! RGS event stream validator CLI
//!
//! Validates a recorded round event log (JSON or JSON Lines) and prints a
//! report. Exit status: 0 pass, 1 fail, 2 usage or input error.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use rgs_core::{ConfigError, SourceError, ValidationReport, ValidatorConfig};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
const EXIT_FAIL: u8 = 1;
#[cfg(feature = "cli")]
const EXIT_USAGE: u8 = 2;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "rgs-validate")]
#[command(about = "Validate RGS round event streams", long_about = None)]
#[command(version)]
struct Cli {
    /// Input JSON or JSONL file
    #[arg(long)]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Validator config JSON (defaults to $RGS_VALIDATOR_CONFIG_PATH)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    init_logging();

    // clap exits with status 2 on usage errors
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) if report.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_FAIL),
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RGS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<ValidationReport> {
    let config = match &cli.config {
        Some(path) => ValidatorConfig::load(path)?,
        None => ValidatorConfig::from_env()?,
    };

    tracing::debug!(input = %cli.input.display(), ?config, "validating");
    let rounds = rgs_core::load_rounds(&cli.input)?;
    let report = rgs_core::validate_rounds(&rounds, &config);

    match cli.format {
        Format::Json => {
            let json = rgs_core::render_json(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
        Format::Text => println!("{}", rgs_core::render_text(&report)),
    }

    Ok(report)
}

/// Ingestion and config failures happen before validation and share the usage code.
#[cfg(feature = "cli")]
fn exit_code_for(err: &anyhow::Error) -> u8 {
    if err.is::<SourceError>() || err.is::<ConfigError>() {
        EXIT_USAGE
    } else {
        EXIT_FAIL
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("rgs-validate is not available. Enable the 'cli' feature to use it.");
    std::process::exit(2);
}
