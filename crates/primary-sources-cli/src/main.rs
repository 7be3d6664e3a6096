//! Primary sources CLI - validation and curation of contributed statements.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let endpoints = cli.endpoints;
    let result = match cli.command {
        Commands::Validate {
            file,
            format,
            base_uri,
            typo_threshold,
            output,
            json,
        } => commands::validate::run(file, format, base_uri, typo_threshold, output, json),

        Commands::Ingest {
            file,
            dataset,
            user,
            format,
            base_uri,
            typo_threshold,
            json,
        } => commands::ingest::run(
            &endpoints,
            commands::ingest::IngestArgs {
                file,
                dataset,
                user,
                format,
                base_uri,
                typo_threshold,
            },
            json,
        ),

        Commands::Curate {
            request,
            line,
            state,
            user,
            dataset,
            json,
        } => commands::curate::run(&endpoints, request, line, state, user, dataset, json),

        Commands::Suggest {
            qid,
            random,
            dataset,
            json,
        } => commands::suggest::run(&endpoints, qid, random, dataset, json),

        Commands::Datasets { json } => commands::datasets::run(&endpoints, json),

        Commands::Stats {
            dataset,
            limit,
            json,
        } => commands::stats::run(&endpoints, dataset, limit, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "primary_sources=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
