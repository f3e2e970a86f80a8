//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{LecternArgs, OutputFormat};
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::index::IndexStats;
use crate::search::{ExecutionPolicy, SearchMetrics, SearchServerConfig};

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub status: DocumentStatus,
    pub policy: ExecutionPolicy,
    pub total_hits: usize,
    pub duration_ms: u64,
    pub pages: Vec<Vec<Document>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SearchMetrics>,
}

/// Result structure for document matching.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchOutput {
    pub id: DocumentId,
    pub query: String,
    pub status: DocumentStatus,
    pub terms: Vec<String>,
}

/// Results of one query in a batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchEntry {
    pub query: String,
    pub documents: Vec<Document>,
}

/// Result structure for batch queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchOutput {
    pub total_queries: usize,
    pub no_result_queries: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub results: Vec<BatchEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined: Option<Vec<Document>>,
}

/// Result structure for duplicate removal.
#[derive(Debug, Serialize, Deserialize)]
pub struct DedupOutput {
    pub removed: Vec<DocumentId>,
    pub remaining: usize,
}

/// Result structure for index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOutput {
    pub stats: IndexStats,
    pub stop_words: Vec<String>,
    pub config: SearchServerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_ids: Option<Vec<DocumentId>>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanOutput for SearchOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Search Results:")?;
        writeln!(out, "═══════════════")?;

        let paged = self.pages.len() > 1;
        for (page_number, page) in self.pages.iter().enumerate() {
            if paged {
                writeln!(out)?;
                writeln!(out, "Page {}", page_number + 1)?;
                writeln!(out, "─────────────")?;
            }
            for document in page {
                writeln!(out, "{document}")?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Total hits: {}", self.total_hits)?;
        writeln!(out, "Search time: {}ms", self.duration_ms)?;

        if let Some(metrics) = &self.metrics {
            writeln!(out)?;
            writeln!(out, "Metrics:")?;
            writeln!(out, "───────")?;
            writeln!(out, "Searches: {}", metrics.total_searches)?;
            writeln!(out, "Candidates ranked: {}", metrics.total_candidates_ranked)?;
            writeln!(out, "Hits returned: {}", metrics.total_hits_returned)?;
            writeln!(out, "Average time: {:?}", metrics.avg_execution_time)?;
        }
        Ok(())
    }
}

impl HumanOutput for MatchOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.terms.is_empty() {
            writeln!(
                out,
                "{{ document_id = {}, status = {}, words = }}",
                self.id, self.status
            )
        } else {
            writeln!(
                out,
                "{{ document_id = {}, status = {}, words = {} }}",
                self.id,
                self.status,
                self.terms.join(" ")
            )
        }
    }
}

impl HumanOutput for BatchOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Batch Results:")?;
        writeln!(out, "══════════════")?;

        for entry in &self.results {
            writeln!(out)?;
            writeln!(out, "Query: {}", entry.query)?;
            writeln!(out, "─────────────")?;
            for document in &entry.documents {
                writeln!(out, "{document}")?;
            }
        }
        if let Some(joined) = &self.joined {
            writeln!(out)?;
            for document in joined {
                writeln!(out, "{document}")?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Queries: {}", self.total_queries)?;
        writeln!(out, "Queries without results: {}", self.no_result_queries)?;
        writeln!(out, "Batch time: {}ms", self.duration_ms)
    }
}

impl HumanOutput for DedupOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for id in &self.removed {
            writeln!(out, "Found duplicate document id {id}")?;
        }
        writeln!(out, "Removed: {}", self.removed.len())?;
        writeln!(out, "Remaining documents: {}", self.remaining)
    }
}

impl HumanOutput for StatsOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Index Statistics:")?;
        writeln!(out, "════════════════")?;
        writeln!(out, "Documents: {}", self.stats.document_count)?;
        writeln!(out, "Terms: {}", self.stats.term_count)?;
        writeln!(out, "Postings: {}", self.stats.posting_count)?;
        writeln!(out, "Stop words: {}", self.stop_words.join(" "))?;
        writeln!(out)?;
        writeln!(out, "Configuration:")?;
        writeln!(out, "────────────────")?;
        writeln!(out, "Shards: {}", self.config.shard_count)?;
        writeln!(out, "Threads: {}", self.config.effective_thread_pool_size())?;
        writeln!(out, "Request window: {}", self.config.request_window)?;

        if let Some(ids) = &self.document_ids {
            writeln!(out)?;
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            writeln!(out, "Document ids: {}", ids.join(" "))?;
        }
        Ok(())
    }
}

/// Output a result to stdout in the selected format.
pub fn output_result<T>(message: &str, result: &T, args: &LecternArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the selected format.
pub fn write_result<T>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &LecternArgs,
) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(out, message, result, args),
        OutputFormat::Json => output_json(out, result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &LecternArgs,
) -> Result<()> {
    if args.verbosity() > 1 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }
    result.write_human(out)?;
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(out: &mut dyn Write, result: &T, args: &LecternArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}
