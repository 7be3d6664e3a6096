//! Datasets command - list datasets and their uploaders.

use colored::Colorize;
use primary_sources::Suggester;

use super::connect;
use crate::cli::Endpoints;

pub fn run(endpoints: &Endpoints, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let datasets = Suggester::new(connect(endpoints)?).datasets()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&datasets)?);
        return Ok(());
    }

    if datasets.is_empty() {
        println!("{}", "No datasets uploaded yet.".yellow());
        return Ok(());
    }

    println!("{}", "Datasets:".cyan().bold());
    for summary in &datasets {
        println!("  {}", summary.dataset.white().bold());
        for uploader in &summary.uploaders {
            println!("    uploaded by {}", uploader);
        }
    }

    Ok(())
}
