//! Ingest command - validate a dataset and upload its valid statements.

use std::path::PathBuf;

use colored::Colorize;
use primary_sources::{Ingestor, PrimarySourcesConfig, RdfFormat};

use super::validate::print_report;
use super::{connect, resolve_format};
use crate::cli::Endpoints;

/// Arguments of one upload.
pub struct IngestArgs {
    pub file: PathBuf,
    pub dataset: String,
    pub user: String,
    pub format: Option<RdfFormat>,
    pub base_uri: String,
    pub typo_threshold: usize,
}

pub fn run(endpoints: &Endpoints, args: IngestArgs, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = resolve_format(&args.file, args.format)?;
    let bytes = std::fs::read(&args.file)?;

    let config = PrimarySourcesConfig::new().with_typo_threshold(args.typo_threshold);
    config.validate()?;

    let ingestor = Ingestor::with_config(connect(endpoints)?, config);
    let report = ingestor.ingest(&bytes, &args.base_uri, format, &args.dataset, &args.user)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} into {}",
        "Ingesting".cyan().bold(),
        args.file.display().to_string().white(),
        report.graph.white()
    );
    println!();
    println!(
        "Accepted: {}/{}",
        report.accepted_triples.to_string().green(),
        report.total_triples
    );
    print_report(&report.invalid);
    println!();

    if report.uploaded {
        println!("{}", "Dataset uploaded.".green().bold());
    } else {
        println!("{}", "Nothing uploaded: no valid triples.".yellow().bold());
    }

    Ok(())
}
