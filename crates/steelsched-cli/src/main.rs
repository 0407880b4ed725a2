//! steelsched CLI
//!
//! Validate extracted steel schedules from saved model responses.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use steelsched::{ScheduleType, ScheduleValidationReport, ValidationConfig, classify, process_response};
use tracing::{debug, info};

/// Exit code for `validate --fail-on-errors` when a row is invalid.
const EXIT_ROWS_INVALID: u8 = 2;

/// Schedule kinds accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScheduleArg {
    /// Beam schedule (Mark, Size, Qty, Length, Grade, PaintSystem, Comments)
    Beam,
    /// Column schedule (Mark, SectionType, Size, Length, Grade, plates, Finish, Comments)
    Column,
}

impl From<ScheduleArg> for ScheduleType {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Beam => ScheduleType::Beam,
            ScheduleArg::Column => ScheduleType::Column,
        }
    }
}

#[derive(Parser)]
#[command(name = "steelsched")]
#[command(version, about = "Validate and correct OCR-extracted structural steel schedules")]
struct Args {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a model response and print the validation report as JSON
    Validate {
        /// File holding the model response (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Schedule type (detected from the first row when omitted)
        #[arg(short, long, value_enum)]
        schedule_type: Option<ScheduleArg>,

        /// Config file (.toml, .yaml, .yml or .json); defaults to a discovered steelsched.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,

        /// Exit with status 2 when any row is invalid
        #[arg(long)]
        fail_on_errors: bool,
    },

    /// Print the text confidence of a value (high or low)
    Classify {
        /// Text to classify
        text: String,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Config file (.toml, .yaml, .yml or .json); defaults to a discovered steelsched.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Validate {
            file,
            schedule_type,
            config,
            pretty,
            fail_on_errors,
        } => {
            let config = load_config(config.as_deref())?;
            let report = validate(file.as_deref(), schedule_type.map(Into::into), &config)?;
            print_json(&report, pretty)?;

            if fail_on_errors && report.has_errors() {
                return Ok(ExitCode::from(EXIT_ROWS_INVALID));
            }
        }
        Command::Classify { text } => {
            println!("{}", classify(&text));
        }
        Command::Config { config } => {
            let config = load_config(config.as_deref())?;
            print_json(&config, true)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let directive = if verbose { "steelsched=debug" } else { "steelsched=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("directive is compile-time constant")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ValidationConfig> {
    match path {
        Some(path) => ValidationConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let discovered = ValidationConfig::discover().context("Failed to discover steelsched.toml")?;
            if discovered.is_some() {
                debug!("Using discovered steelsched.toml");
            }
            Ok(discovered.unwrap_or_default())
        }
    }
}

fn read_response(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut response = String::new();
            std::io::stdin()
                .read_to_string(&mut response)
                .context("Failed to read model response from stdin")?;
            Ok(response)
        }
    }
}

fn validate(
    file: Option<&Path>,
    schedule_type: Option<ScheduleType>,
    config: &ValidationConfig,
) -> Result<ScheduleValidationReport> {
    let response = read_response(file)?;
    let source = file.map_or_else(|| "stdin".to_string(), |path| path.display().to_string());

    let report = process_response(&response, schedule_type, config)
        .with_context(|| format!("Failed to process model response from {}", source))?;

    info!(
        source = %source,
        rows = report.total_rows,
        invalid = report.rows_with_errors,
        "Validation complete"
    );

    Ok(report)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    println!("{}", json);
    Ok(())
}
