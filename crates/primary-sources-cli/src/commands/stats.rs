//! Stats command - pending statement counts and the curator leaderboard.

use colored::Colorize;
use primary_sources::Suggester;

use super::connect;
use crate::cli::Endpoints;

pub fn run(
    endpoints: &Endpoints,
    dataset: Option<String>,
    limit: usize,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let suggester = Suggester::new(connect(endpoints)?);
    let pending = suggester.pending_count(dataset.as_deref())?;
    let leaderboard = suggester.leaderboard(limit)?;

    if json_output {
        let stats = serde_json::json!({
            "dataset": dataset,
            "pending_items": pending,
            "leaderboard": leaderboard,
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    match &dataset {
        Some(dataset) => println!("{} {}", "Statistics for".cyan().bold(), dataset.white()),
        None => println!("{}", "Statistics for all datasets".cyan().bold()),
    }
    println!();
    println!("Items with pending statements: {}", pending.to_string().white().bold());
    println!();

    println!("{}", "Top curators:".yellow().bold());
    if leaderboard.is_empty() {
        println!("  (no curation activity yet)");
    }
    for (rank, entry) in leaderboard.iter().enumerate() {
        println!(
            "  {:>2}. {:<30} {}",
            rank + 1,
            entry.user,
            entry.activities.to_string().green()
        );
    }

    Ok(())
}
