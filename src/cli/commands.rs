//! Command implementations for the lectern CLI.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::stop_words::StopWords;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::{DocumentId, DocumentStatus};
use crate::error::Result;
use crate::maintenance::remove_duplicates;
use crate::parallel_search::process_queries;
use crate::search::{MAX_RESULT_DOCUMENT_COUNT, SearchServer, SearchServerConfig};
use crate::util::paginate;

/// One line of a documents file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Execute a CLI command.
pub fn execute_command(args: LecternArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => {
            let output = run_search(search_args)?;
            output_result("Search completed", &output, &args)
        }
        Command::Match(match_args) => {
            let output = run_match(match_args)?;
            output_result("Match completed", &output, &args)
        }
        Command::Batch(batch_args) => {
            let output = run_batch(batch_args)?;
            output_result("Batch completed", &output, &args)
        }
        Command::Dedup(dedup_args) => {
            let output = run_dedup(dedup_args)?;
            output_result("Duplicates removed", &output, &args)
        }
        Command::Stats(stats_args) => {
            let output = run_stats(stats_args)?;
            output_result("Index statistics", &output, &args)
        }
    }
}

/// Read document records from a JSONL file.
///
/// Blank lines are skipped. Lines that fail to parse are logged and skipped.
pub fn load_documents(path: &Path) -> Result<Vec<DocumentRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<DocumentRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping line {} of {}: {e}", line_num + 1, path.display()),
        }
    }
    Ok(records)
}

/// Build a server from the index source arguments.
///
/// Records the index rejects are logged and skipped.
pub fn build_server(source: &IndexSourceArgs) -> Result<SearchServer> {
    let config = match &source.config {
        Some(path) => SearchServerConfig::from_json_file(path)?,
        None => SearchServerConfig::default(),
    };
    let stop_words = StopWords::from_text(&source.stop_words)?;
    let mut server = SearchServer::with_config(stop_words, config)?;

    let start_time = Instant::now();
    let records = load_documents(&source.documents)?;
    let mut skipped = 0;
    for record in &records {
        if let Err(e) =
            server.add_document(record.id, &record.text, record.status, &record.ratings)
        {
            warn!("Skipping document {}: {e}", record.id);
            skipped += 1;
        }
    }

    info!(
        "Indexed {} documents from {} ({skipped} skipped) in {}ms",
        server.document_count(),
        source.documents.display(),
        start_time.elapsed().as_millis()
    );
    Ok(server)
}

/// Read queries from a file, one per line, skipping blank lines.
pub fn load_queries(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Run the `search` command.
pub fn run_search(args: &SearchArgs) -> Result<SearchOutput> {
    let server = build_server(&args.source)?;

    let start_time = Instant::now();
    let documents =
        server.find_top_documents_by_status_with_policy(args.policy, &args.query, args.status)?;
    let duration = start_time.elapsed();

    let page_size = args.page_size.unwrap_or(MAX_RESULT_DOCUMENT_COUNT);
    let pages = paginate(&documents, page_size)?
        .map(<[_]>::to_vec)
        .collect();

    Ok(SearchOutput {
        query: args.query.clone(),
        status: args.status,
        policy: args.policy,
        total_hits: documents.len(),
        duration_ms: duration.as_millis() as u64,
        pages,
        metrics: args.metrics.then(|| server.metrics()),
    })
}

/// Run the `match` command.
pub fn run_match(args: &MatchArgs) -> Result<MatchOutput> {
    let server = build_server(&args.source)?;
    let (terms, status) = server.match_document_with_policy(args.policy, &args.query, args.id)?;

    Ok(MatchOutput {
        id: args.id,
        query: args.query.clone(),
        status,
        terms,
    })
}

/// Run the `batch` command.
pub fn run_batch(args: &BatchArgs) -> Result<BatchOutput> {
    let server = build_server(&args.source)?;
    let queries = load_queries(&args.queries)?;

    let start_time = Instant::now();
    let results = process_queries(&server, &queries)?;
    let no_result_queries = results.iter().filter(|found| found.is_empty()).count();

    let (results, joined) = if args.joined {
        (Vec::new(), Some(results.into_iter().flatten().collect()))
    } else {
        let entries = queries
            .iter()
            .zip(results)
            .map(|(query, documents)| BatchEntry {
                query: query.clone(),
                documents,
            })
            .collect();
        (entries, None)
    };

    Ok(BatchOutput {
        total_queries: queries.len(),
        no_result_queries,
        duration_ms: start_time.elapsed().as_millis() as u64,
        results,
        joined,
    })
}

/// Run the `dedup` command.
pub fn run_dedup(args: &DedupArgs) -> Result<DedupOutput> {
    let mut server = build_server(&args.source)?;
    let removed = remove_duplicates(&mut server);

    Ok(DedupOutput {
        removed,
        remaining: server.document_count(),
    })
}

/// Run the `stats` command.
pub fn run_stats(args: &StatsArgs) -> Result<StatsOutput> {
    let server = build_server(&args.source)?;

    Ok(StatsOutput {
        stats: server.stats(),
        stop_words: server
            .index()
            .analyzer()
            .stop_words()
            .sorted()
            .into_iter()
            .map(str::to_string)
            .collect(),
        config: server.config().clone(),
        document_ids: args.ids.then(|| server.document_ids().collect()),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn documents_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    fn source(file: &NamedTempFile, stop_words: &str) -> IndexSourceArgs {
        IndexSourceArgs {
            documents: file.path().to_path_buf(),
            stop_words: stop_words.to_string(),
            config: None,
        }
    }

    #[test]
    fn test_load_documents_defaults_and_skips() {
        let file = documents_file(&[
            r#"{"id": 1, "text": "white cat", "status": "banned", "ratings": [1, 2]}"#,
            "",
            r#"{"id": 2, "text": "black dog"}"#,
            "not json",
        ]);
        let records = load_documents(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, DocumentStatus::Banned);
        assert_eq!(records[0].ratings, vec![1, 2]);
        assert_eq!(records[1].status, DocumentStatus::Actual);
        assert!(records[1].ratings.is_empty());
    }

    #[test]
    fn test_build_server_skips_rejected_documents() {
        let file = documents_file(&[
            r#"{"id": 1, "text": "white cat"}"#,
            r#"{"id": 1, "text": "duplicate id"}"#,
            r#"{"id": -5, "text": "negative id"}"#,
            r#"{"id": 3, "text": "bad\u0001token"}"#,
            r#"{"id": 4, "text": "fluffy dog"}"#,
        ]);
        let server = build_server(&source(&file, "")).unwrap();
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_missing_documents_file() {
        let args = IndexSourceArgs {
            documents: "/nonexistent/lectern/docs.jsonl".into(),
            stop_words: String::new(),
            config: None,
        };
        assert!(build_server(&args).is_err());
    }

    #[test]
    fn test_run_search_pages() {
        let file = documents_file(&[
            r#"{"id": 1, "text": "cat one", "ratings": [1]}"#,
            r#"{"id": 2, "text": "cat two", "ratings": [2]}"#,
            r#"{"id": 3, "text": "cat three", "ratings": [3]}"#,
            r#"{"id": 4, "text": "dog"}"#,
        ]);
        let args = SearchArgs {
            source: source(&file, ""),
            query: "cat".to_string(),
            status: DocumentStatus::Actual,
            policy: crate::search::ExecutionPolicy::Parallel,
            page_size: Some(2),
            metrics: true,
        };
        let output = run_search(&args).unwrap();

        assert_eq!(output.total_hits, 3);
        assert_eq!(output.pages.len(), 2);
        let ids: Vec<DocumentId> = output.pages.iter().flatten().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(output.metrics.map(|m| m.parallel_searches), Some(1));
    }

    #[test]
    fn test_run_search_zero_page_size() {
        let file = documents_file(&[r#"{"id": 1, "text": "cat"}"#]);
        let args = SearchArgs {
            source: source(&file, ""),
            query: "cat".to_string(),
            status: DocumentStatus::Actual,
            policy: crate::search::ExecutionPolicy::Sequential,
            page_size: Some(0),
            metrics: false,
        };
        assert!(run_search(&args).unwrap_err().is_invalid_argument());
    }
}
