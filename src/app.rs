//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and initializes logging
//! - resolves configuration (environment, `.env`, flags)
//! - loads the model artifact once
//! - runs one request and prints the result

use std::path::Path;

use clap::Parser;

use crate::cli::{Cli, Command, FormArgs, ModelArgs, OutputFormat, PredictArgs};
use crate::config::ServiceConfig;
use crate::domain::PredictionResult;
use crate::error::AppError;
use crate::io::{load_estimator, load_linear_model, normalize, write_model_file};
use crate::models::ModelFile;
use crate::predict::{PredictionService, global};

/// Entry point for the `hpe` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Normalize(args) => handle_normalize(args),
        Command::Info(args) => handle_info(args),
        Command::InitModel { output, force } => handle_init_model(&output, force),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = ServiceConfig::from_env()?.with_overrides(args.model.model, args.strict_county);
    let form = args.form.to_form()?;

    let estimator = load_estimator(&config.model_path)?;
    let service = global::install(
        PredictionService::new(estimator).with_strict_county(config.strict_county),
    )?;

    let result = service.handle(&form);
    match args.format {
        OutputFormat::Text => print!("{}", crate::report::format_result(&result)),
        OutputFormat::Json => println!("{}", crate::report::format_result_json(&result)?),
    }

    outcome(&result)
}

/// Exit status for a printed result. Failures carry no message because the
/// result output already shows it.
fn outcome(result: &PredictionResult) -> Result<(), AppError> {
    match result {
        PredictionResult::Estimate(_) => Ok(()),
        PredictionResult::Failure(failure) => {
            Err(AppError::new(failure.kind.exit_code(), String::new()))
        }
    }
}

fn handle_normalize(args: FormArgs) -> Result<(), AppError> {
    let form = args.to_form()?;
    let request = normalize(&form)?;
    print!("{}", crate::report::format_request(&request));
    Ok(())
}

fn handle_info(args: ModelArgs) -> Result<(), AppError> {
    let config = ServiceConfig::from_env()?.with_overrides(args.model, false);
    let model = load_linear_model(&config.model_path)?;
    print!("{}", crate::report::format_model_summary(&model.summary()));
    Ok(())
}

fn handle_init_model(output: &Path, force: bool) -> Result<(), AppError> {
    if output.exists() && !force {
        return Err(AppError::usage(format!(
            "'{}' already exists (use --force to overwrite).",
            output.display()
        )));
    }
    write_model_file(output, &ModelFile::demo())?;
    log::info!("wrote demo model artifact to {}", output.display());
    Ok(())
}
