//! Suggest command - list pending statements for an item.

use colored::Colorize;
use primary_sources::{Suggester, SuggestionBatch};

use super::connect;
use crate::cli::Endpoints;

pub fn run(
    endpoints: &Endpoints,
    qid: Option<String>,
    random: bool,
    dataset: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let suggester = Suggester::new(connect(endpoints)?);
    let dataset = dataset.as_deref();

    let picked = if random {
        suggester.random_item(dataset, |count| fastrand::u64(0..count))?
    } else {
        let qid = qid.ok_or("Pass an item id or --random")?;
        let batch = suggester.item(&qid, dataset)?;
        Some((qid, batch))
    };

    let Some((qid, batch)) = picked else {
        if json_output {
            println!("null");
        } else {
            println!("{}", "No pending suggestions.".yellow());
        }
        return Ok(());
    };

    if json_output {
        let body = serde_json::json!({
            "qid": qid,
            "suggestions": batch.suggestions,
            "failures": batch.failures,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_batch(&qid, &batch);
    }

    Ok(())
}

fn print_batch(qid: &str, batch: &SuggestionBatch) {
    println!("{} {}", "Suggestions for".cyan().bold(), qid.white().bold());
    println!();

    if batch.is_empty() {
        println!("{}", "No pending suggestions.".yellow());
        return;
    }

    for suggestion in &batch.suggestions {
        println!("{}", suggestion.line);
        println!("  {}", suggestion.dataset.dimmed());
    }

    if !batch.failures.is_empty() {
        println!();
        println!("{}", "Skipped:".yellow().bold());
        for failure in &batch.failures {
            let node = failure.statement_node.as_deref().unwrap_or("-");
            println!("  {} {}", node.red(), failure.reason);
        }
    }
}
