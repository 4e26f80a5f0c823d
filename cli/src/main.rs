use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use fde_deploy_core::{
    DocumentError, VERSION, get_pattern_recommendations, load_document, validate_config,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod report;

const EXAMPLES: &str = "\
Examples:
  fde-validate samples/deployment.sample.yaml
  fde-validate ./my-service/deployment.yaml
  fde-validate --format json deployment.yaml";

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fde-validate")]
#[command(about = "FDE Deployment Pattern Validator")]
#[command(after_help = EXAMPLES)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Deployment document (YAML) to validate.
    path: Option<PathBuf>,
    /// Show version.
    #[arg(short = 'v', long)]
    version: bool,
    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    format: CliOutputFormat,
    /// Log debug detail to stderr (overridden by RUST_LOG).
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.version {
        println!("fde-deployment-patterns v{VERSION}");
        return;
    }

    let Some(path) = cli.path else {
        if let Err(err) = Cli::command().print_help() {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
        return;
    };

    match run_validate(&path, cli.format) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Validates one document and prints the report.
///
/// Returns whether the document passed; `Err` carries the message for
/// failures that happen before a report can be produced.
fn run_validate(path: &Path, format: CliOutputFormat) -> Result<bool, String> {
    let document = load_document(path).map_err(|err| match err {
        DocumentError::NotFound { .. } => err.to_string(),
        other => format!("Error: {other}"),
    })?;

    let result = validate_config(&document);
    let recommendations = result
        .config()
        .map(get_pattern_recommendations)
        .unwrap_or_default();
    debug!(
        path = %path.display(),
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validation finished"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        CliOutputFormat::Text => report::write_text(&mut out, path, &result, &recommendations),
        CliOutputFormat::Json => report::write_json(&mut out, path, &result, &recommendations),
    };
    written
        .and_then(|()| out.flush())
        .map_err(|err| format!("Error: failed to write report: {err}"))?;

    Ok(result.valid)
}
