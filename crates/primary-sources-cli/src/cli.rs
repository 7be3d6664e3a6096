//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use primary_sources::{CurationState, RdfFormat};
use std::path::PathBuf;

/// Primary sources: validate, ingest and curate contributed statements
#[derive(Parser)]
#[command(name = "primary-sources")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub endpoints: Endpoints,
}

/// SPARQL endpoints of the backing triple store.
#[derive(Args, Clone, Debug)]
pub struct Endpoints {
    /// SPARQL query endpoint
    #[arg(long, global = true, env = "PRIMARY_SOURCES_QUERY_ENDPOINT")]
    pub query_endpoint: Option<String>,

    /// SPARQL update endpoint (default: the query endpoint)
    #[arg(long, global = true, env = "PRIMARY_SOURCES_UPDATE_ENDPOINT")]
    pub update_endpoint: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "60")]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a dataset's syntax and statement structure without uploading
    Validate {
        /// Path to the RDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// RDF serialization (default: guessed from the file extension)
        #[arg(short, long)]
        format: Option<RdfFormat>,

        /// Base IRI for relative references
        #[arg(long, default_value = "http://www.wikidata.org/")]
        base_uri: String,

        /// Maximum namespace edit distance treated as a typo
        #[arg(long, default_value = "3")]
        typo_threshold: usize,

        /// Write the valid triples as N-Triples to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a dataset and upload its valid statements
    Ingest {
        /// Path to the RDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dataset IRI
        #[arg(short, long)]
        dataset: String,

        /// Uploading user name
        #[arg(short, long)]
        user: String,

        /// RDF serialization (default: guessed from the file extension)
        #[arg(short, long)]
        format: Option<RdfFormat>,

        /// Base IRI for relative references
        #[arg(long, default_value = "http://www.wikidata.org/")]
        base_uri: String,

        /// Maximum namespace edit distance treated as a typo
        #[arg(long, default_value = "3")]
        typo_threshold: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve, reject, flag as duplicate or blacklist a statement
    Curate {
        /// JSON curation request file (use "-" for stdin)
        #[arg(long, conflicts_with = "line")]
        request: Option<PathBuf>,

        /// Curator line naming the statement (subject, property, value and
        /// at most one qualifier or reference, tab separated)
        #[arg(long, required_unless_present = "request")]
        line: Option<String>,

        /// Target state (approved, rejected, duplicate, blacklisted)
        #[arg(long, required_unless_present = "request")]
        state: Option<CurationState>,

        /// Curating user name
        #[arg(short, long, required_unless_present = "request")]
        user: Option<String>,

        /// Dataset IRI
        #[arg(short, long, required_unless_present = "request")]
        dataset: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show pending suggestions for an item
    Suggest {
        /// Item identifier (e.g. Q42)
        #[arg(value_name = "QID", required_unless_present = "random")]
        qid: Option<String>,

        /// Pick a random item with pending suggestions
        #[arg(long, conflicts_with = "qid")]
        random: bool,

        /// Restrict to one dataset
        #[arg(short, long)]
        dataset: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List datasets and their uploaders
    Datasets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show pending statement counts and the curator leaderboard
    Stats {
        /// Restrict the pending count to one dataset
        #[arg(short, long)]
        dataset: Option<String>,

        /// Number of curators to list
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
