//! Validate command - check a dataset without uploading it.

use std::path::PathBuf;

use colored::Colorize;
use primary_sources::validation::ValidatorConfig;
use primary_sources::{DataModelValidator, InvalidComponentReport, RdfFormat};

use super::resolve_format;

pub fn run(
    file: PathBuf,
    format: Option<RdfFormat>,
    base_uri: String,
    typo_threshold: usize,
    output: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = resolve_format(&file, format)?;
    let bytes = std::fs::read(&file)?;

    let validator = DataModelValidator::with_config(ValidatorConfig { typo_threshold });
    let outcome = validator.check(&bytes, &base_uri, format)?;

    if let Some(path) = &output {
        std::fs::write(path, outcome.valid.to_ntriples())?;
    }

    if json_output {
        let summary = serde_json::json!({
            "file": file.display().to_string(),
            "format": format,
            "valid_triples": outcome.valid.len(),
            "invalid": outcome.report,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} {} ({})", "Validating".cyan().bold(), file.display().to_string().white(), format);
    println!();
    println!("Valid triples: {}", outcome.valid.len().to_string().green());
    print_report(&outcome.report);

    if let Some(path) = output {
        println!();
        println!("{} {}", "Wrote valid triples to".green(), path.display());
    }

    Ok(())
}

/// Print invalid components grouped under a header.
pub fn print_report(report: &InvalidComponentReport) {
    if report.is_empty() {
        println!("{}", "No invalid components.".green());
        return;
    }

    println!("Invalid components: {}", report.len().to_string().red());
    println!();
    for violation in report.violations() {
        println!("  {} {}", violation.expected.label().yellow(), violation.component);
    }
}
