//! Curate command - move a statement out of the pending graph.

use std::io::Read;
use std::path::{Path, PathBuf};

use colored::Colorize;
use primary_sources::curation::CurationOutcome;
use primary_sources::{CurationRequest, CurationState, Curator, StatementLocator};

use super::connect;
use crate::cli::Endpoints;

pub fn run(
    endpoints: &Endpoints,
    request: Option<PathBuf>,
    line: Option<String>,
    state: Option<CurationState>,
    user: Option<String>,
    dataset: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let curator = Curator::new(connect(endpoints)?);

    let outcome = match request {
        Some(path) => {
            let request: CurationRequest = serde_json::from_str(&read_request(&path)?)?;
            curator.curate(&request)?
        }
        None => {
            // clap enforces these when no request file is given
            let (Some(line), Some(state), Some(user), Some(dataset)) = (line, state, user, dataset) else {
                return Err("--line, --state, --user and --dataset are required without --request".into());
            };
            let locator = StatementLocator::from_curator_line(&line)?;
            curator.decide(&locator, state, &user, &dataset)?
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn read_request(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn print_outcome(outcome: &CurationOutcome) {
    let state = match outcome.state {
        CurationState::Approved => outcome.state.label().green().bold(),
        CurationState::Duplicate => outcome.state.label().blue().bold(),
        _ => outcome.state.label().red().bold(),
    };

    println!(
        "{} {} {} {}",
        state,
        outcome.locator.kind.to_string().white(),
        "on".dimmed(),
        outcome.locator.subject_id.white().bold()
    );
    println!("  Property: {}", outcome.locator.property_id);
    println!("  Value:    {}", outcome.locator.value);
    println!("  From:     {}", outcome.source_graph);
    println!("  To:       {}", outcome.target_graph);
    println!("  By:       {}", outcome.user.cyan());
}
