//! Command line argument parsing for the lectern CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentId, DocumentStatus};
use crate::search::ExecutionPolicy;

/// Lectern - an in-memory TF-IDF document index
#[derive(Parser, Debug, Clone)]
#[command(name = "lectern")]
#[command(about = "Rank documents from a JSONL file against plus/minus keyword queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LecternArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LecternArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find the top documents for a query
    Search(SearchArgs),

    /// Show which query terms a document matches
    Match(MatchArgs),

    /// Run a file of queries, one per line, in parallel
    Batch(BatchArgs),

    /// Remove documents whose term sets repeat an earlier document
    Dedup(DedupArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Where the index is built from.
#[derive(Args, Debug, Clone)]
pub struct IndexSourceArgs {
    /// Documents to index (JSONL, one `{"id", "text", "status", "ratings"}` per line)
    #[arg(short, long, value_name = "DOCUMENTS_FILE")]
    pub documents: PathBuf,

    /// Space-separated stop words
    #[arg(short, long, env = "LECTERN_STOP_WORDS", default_value = "")]
    pub stop_words: String,

    /// Server configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for searching
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: IndexSourceArgs,

    /// Query string; prefix a word with `-` to exclude it
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub query: String,

    /// Only return documents with this status
    #[arg(long, default_value = "actual")]
    pub status: DocumentStatus,

    /// Evaluation policy
    #[arg(short, long, default_value = "sequential")]
    pub policy: ExecutionPolicy,

    /// Group results into pages of this size
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Include search metrics in the output
    #[arg(long)]
    pub metrics: bool,
}

/// Arguments for matching one document
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    #[command(flatten)]
    pub source: IndexSourceArgs,

    /// Document id
    #[arg(value_name = "DOCUMENT_ID")]
    pub id: DocumentId,

    /// Query string; prefix a word with `-` to exclude it
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub query: String,

    /// Evaluation policy
    #[arg(short, long, default_value = "sequential")]
    pub policy: ExecutionPolicy,
}

/// Arguments for batch queries
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub source: IndexSourceArgs,

    /// File with one query per line; blank lines are skipped
    #[arg(value_name = "QUERIES_FILE")]
    pub queries: PathBuf,

    /// Concatenate all result lists instead of reporting per query
    #[arg(long)]
    pub joined: bool,
}

/// Arguments for duplicate removal
#[derive(Args, Debug, Clone)]
pub struct DedupArgs {
    #[command(flatten)]
    pub source: IndexSourceArgs,
}

/// Arguments for index statistics
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: IndexSourceArgs,

    /// Include the document ids
    #[arg(long)]
    pub ids: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
