//! # Choice Validator CLI
//!
//! Validates a discrete choice experiment submission and, on acceptance,
//! can write the input files the processing back end consumes.

use choice_validator::config::{RuntimeConfig, ValidationPreferences};
use choice_validator::logging::{self, LogFacadeLogger, LoggingService};
use choice_validator::{
    expected_io, load_submission, screen_submission, validate_with_preferences,
    write_input_files, DesignInputs, Mode, Submission,
};
use choice_validator::{log_error, log_info};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

const EXIT_ACCEPTED: u8 = 0;
const EXIT_REJECTED: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "choice-validate", version, about = "Validate discrete choice experiment inputs")]
struct Cli {
    /// Runtime preferences file (TOML with [validation] and [logging] tables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Route engine log events through `log`/env_logger (RUST_LOG)
    #[arg(long, global = true)]
    log_facade: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a submission file (.toml) or input directory (in_<field>.dat)
    Validate {
        path: PathBuf,

        /// Operation selection, overriding the submission's own
        #[arg(long)]
        operation: Option<String>,

        /// Effect selection, overriding the submission's own
        #[arg(long)]
        effect: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Run the coarse submission screen before full validation
        #[arg(long)]
        screen: bool,

        /// On acceptance, write in_<field>.dat files and design.json here
        #[arg(long)]
        emit_dir: Option<PathBuf>,
    },

    /// List the files the back end reads and writes for a mode
    ExpectedIo { operation: String, effect: String },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match load_runtime_config(cli.config.as_deref()) {
        Ok(runtime) => runtime,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if let Err(message) = init_logging(&runtime, cli.log_facade) {
        eprintln!("Error: {}", message);
        return ExitCode::from(EXIT_FAILURE);
    }

    let result = match cli.command {
        Command::Validate {
            path,
            operation,
            effect,
            format,
            screen,
            emit_dir,
        } => {
            let request = ValidateRequest {
                path: &path,
                operation: operation.as_deref(),
                effect: effect.as_deref(),
                format,
                screen,
                emit_dir: emit_dir.as_deref(),
                preferences: &runtime.validation,
            };
            logging::with_submission_context(&path.display().to_string(), || {
                run_validate(&request)
            })
        }
        Command::ExpectedIo { operation, effect } => run_expected_io(&operation, &effect),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn load_runtime_config(path: Option<&Path>) -> Result<RuntimeConfig, String> {
    let Some(path) = path else {
        return Ok(RuntimeConfig::default());
    };
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    RuntimeConfig::from_toml_str(&content)
        .map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

fn init_logging(runtime: &RuntimeConfig, log_facade: bool) -> Result<(), String> {
    logging::config::init_runtime_preferences(runtime.logging.clone())?;

    if log_facade {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .init();
        let service = LoggingService::new(
            Arc::new(LogFacadeLogger::new()),
            runtime.logging.min_log_level.to_events_log_level(),
        );
        logging::init_global_logging_with_service(Arc::new(service))?;
        log::debug!(target: "choice_cli", "engine events routed through the log facade");
        Ok(())
    } else {
        logging::init_global_logging()
    }
}

struct ValidateRequest<'a> {
    path: &'a Path,
    operation: Option<&'a str>,
    effect: Option<&'a str>,
    format: OutputFormat,
    screen: bool,
    emit_dir: Option<&'a Path>,
    preferences: &'a ValidationPreferences,
}

fn run_validate(request: &ValidateRequest) -> Result<u8, Box<dyn std::error::Error>> {
    let mut submission = load_submission(request.path)?;
    submission.override_selections(request.operation, request.effect);

    if request.screen {
        let operation = submission.operation.as_deref().unwrap_or_default();
        let effect = submission.effect.as_deref().unwrap_or_default();
        if let Err(error) = screen_submission(&submission.fields, operation, effect) {
            println!("{}", error);
            return Ok(EXIT_REJECTED);
        }
    }

    let mode = submission.mode()?;
    let report = validate_with_preferences(&submission.fields, mode, request.preferences);

    match request.format {
        OutputFormat::Text => println!("{}", report.render(request.preferences.include_banner)),
        OutputFormat::Json => println!("{}", report.to_json_envelope()?),
    }

    if !report.is_accepted() {
        return Ok(EXIT_REJECTED);
    }

    if let Some(dir) = request.emit_dir {
        emit_inputs(dir, &submission, mode)?;
    }

    Ok(EXIT_ACCEPTED)
}

fn emit_inputs(
    dir: &Path,
    submission: &Submission,
    mode: Mode,
) -> Result<(), Box<dyn std::error::Error>> {
    let written = write_input_files(dir, &submission.fields, mode)?;
    let inputs = DesignInputs::from_fields(&submission.fields, mode).map_err(|error| {
        log_error!(error.error_code(), "Accepted submission failed conversion",
            "field" => error.field().wire_name()
        );
        error
    })?;

    let design_path = dir.join("design.json");
    fs::write(&design_path, serde_json::to_string_pretty(&inputs)?)?;

    log_info!("Back-end inputs prepared",
        "dir" => dir.display(),
        "files" => written.len() + 1
    );
    Ok(())
}

fn run_expected_io(operation: &str, effect: &str) -> Result<u8, Box<dyn std::error::Error>> {
    let mode = Mode::from_selections(operation, effect)?;
    let io = expected_io(mode);
    println!("Inputs:  {}", io.inputs.join(" "));
    println!("Outputs: {}", io.outputs.join(" "));
    Ok(EXIT_ACCEPTED)
}
