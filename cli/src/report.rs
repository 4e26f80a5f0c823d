//! Console rendering of a validation run.

use std::io::{self, Write};
use std::path::Path;

use fde_deploy_core::ValidationResult;
use serde::Serialize;

/// Machine-readable form of a run, emitted by `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: &'a Path,
    #[serde(flatten)]
    pub result: &'a ValidationResult,
    pub recommendations: &'a [String],
}

fn write_list(out: &mut impl Write, heading: &str, items: &[String]) -> io::Result<()> {
    writeln!(out, "{heading}")?;
    for item in items {
        writeln!(out, "  • {item}")?;
    }
    Ok(())
}

/// Writes the human-readable report.
///
/// A failed result stops after the error list; the warning, recommendation
/// and summary sections only appear for a valid config.
pub fn write_text(
    out: &mut impl Write,
    path: &Path,
    result: &ValidationResult,
    recommendations: &[String],
) -> io::Result<()> {
    writeln!(out, "\nValidating: {}\n", path.display())?;

    let Some(config) = result.config() else {
        writeln!(out, "Validation FAILED\n")?;
        return write_list(out, "Errors:", &result.errors);
    };

    writeln!(out, "Validation PASSED\n")?;

    if !result.warnings.is_empty() {
        write_list(out, "Warnings:", &result.warnings)?;
        writeln!(out)?;
    }

    if !recommendations.is_empty() {
        write_list(out, "Pattern Recommendations:", recommendations)?;
        writeln!(out)?;
    }

    let scaling = &config.spec.scaling;
    writeln!(out, "Summary:")?;
    writeln!(out, "  Name: {}", config.metadata.name)?;
    writeln!(out, "  Namespace: {}", config.metadata.namespace)?;
    writeln!(out, "  Environment: {}", config.metadata.environment)?;
    writeln!(out, "  Service: {}", config.spec.service.name)?;
    writeln!(
        out,
        "  Scaling: {}-{} replicas",
        scaling.min_replicas, scaling.max_replicas
    )?;
    writeln!(out, "  Rollout: {}", config.spec.rollout.kind)?;
    writeln!(out)
}

/// Writes the JSON report followed by a newline.
pub fn write_json(
    out: &mut impl Write,
    path: &Path,
    result: &ValidationResult,
    recommendations: &[String],
) -> io::Result<()> {
    let report = JsonReport {
        file: path,
        result,
        recommendations,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
