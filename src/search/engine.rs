//! Search server: the inverted index plus ranked retrieval.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::analyzer::TextAnalyzer;
use crate::analysis::stop_words::StopWords;
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::{LecternError, Result};
use crate::index::{IndexStats, InvertedIndex, TermFrequencies};
use crate::parallel_search::engine::{find_all_documents_parallel, match_terms_parallel};
use crate::query::{Query, QueryParser};
use crate::search::config::{ExecutionPolicy, SearchServerConfig};
use crate::search::metrics::{SearchMetrics, SearchMetricsCollector, Timer};
use crate::search::ranking::{find_all_documents, match_terms, rank_documents};

/// In-memory document index with TF-IDF ranked retrieval.
///
/// # Examples
///
/// ```
/// use lectern::document::DocumentStatus;
/// use lectern::search::SearchServer;
///
/// let mut server = SearchServer::new("in the").unwrap();
/// server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
/// server.add_document(55, "dog in the park", DocumentStatus::Actual, &[3, 4, 5]).unwrap();
///
/// let results = server.find_top_documents("dog walks in city park").unwrap();
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].id, 55);
/// assert_eq!(results[1].id, 42);
/// ```
pub struct SearchServer {
    /// Configuration for the server.
    config: SearchServerConfig,

    /// Forward and reverse postings.
    index: InvertedIndex,

    /// Parser sharing the index's analyzer.
    parser: QueryParser,

    /// Thread pool for parallel execution.
    thread_pool: Arc<ThreadPool>,

    /// Metrics collector.
    metrics: Arc<SearchMetricsCollector>,
}

impl fmt::Debug for SearchServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchServer")
            .field("config", &self.config)
            .field("documents", &self.index.document_count())
            .field("terms", &self.index.term_count())
            .finish()
    }
}

impl SearchServer {
    /// Create a server whose stop words are given as space-separated text.
    pub fn new(stop_words: &str) -> Result<Self> {
        Self::with_config(StopWords::from_text(stop_words)?, SearchServerConfig::default())
    }

    /// Create a server from any collection of stop words.
    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(
            StopWords::from_words(stop_words)?,
            SearchServerConfig::default(),
        )
    }

    /// Create a server with an explicit configuration.
    pub fn with_config(stop_words: StopWords, config: SearchServerConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(config.effective_thread_pool_size())
            .thread_name(|i| format!("lectern-search-{i}"))
            .build()
            .map_err(|e| LecternError::thread_pool(format!("Failed to create thread pool: {e}")))?;

        let analyzer = TextAnalyzer::new(Arc::new(stop_words));
        Ok(Self {
            config,
            index: InvertedIndex::with_analyzer(analyzer.clone()),
            parser: QueryParser::new(analyzer),
            thread_pool: Arc::new(thread_pool),
            metrics: Arc::new(SearchMetricsCollector::new()),
        })
    }

    /// The server configuration.
    pub fn config(&self) -> &SearchServerConfig {
        &self.config
    }

    /// The underlying index.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// The worker pool used for parallel evaluation.
    pub fn thread_pool(&self) -> &ThreadPool {
        &self.thread_pool
    }

    /// Index a document. See [`InvertedIndex::add_document`].
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.index.add_document(id, text, status, ratings)
    }

    /// Remove a document. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocumentId) {
        self.index.remove_document(id);
    }

    /// Term frequencies of a document, empty for unknown ids.
    pub fn term_frequencies(&self, id: DocumentId) -> Cow<'_, TermFrequencies> {
        self.index.term_frequencies(id)
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.document_ids()
    }

    /// Index statistics.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Parse a raw query with the server's stop words.
    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        self.parser.parse(raw_query)
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_policy(ExecutionPolicy::Sequential, raw_query)
    }

    /// Top documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by_status_with_policy(ExecutionPolicy::Sequential, raw_query, status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with_predicate(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// [`find_top_documents`](Self::find_top_documents) under an execution policy.
    pub fn find_top_documents_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by_status_with_policy(policy, raw_query, DocumentStatus::Actual)
    }

    /// [`find_top_documents_by_status`](Self::find_top_documents_by_status) under an execution policy.
    pub fn find_top_documents_by_status_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with_predicate(policy, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Ranked retrieval with a predicate under an execution policy.
    ///
    /// Both policies return identical results for the same index and query.
    pub fn find_top_documents_with_predicate<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let timer = Timer::start();

        let outcome = self.parse_query(raw_query).and_then(|query| {
            let candidates = match policy {
                ExecutionPolicy::Sequential => find_all_documents(&self.index, &query, &predicate),
                ExecutionPolicy::Parallel => self.thread_pool.install(|| {
                    find_all_documents_parallel(
                        &self.index,
                        &query,
                        &predicate,
                        self.config.shard_count,
                    )
                })?,
            };
            let candidate_count = candidates.len();
            Ok((candidate_count, rank_documents(candidates)))
        });

        if self.config.enable_metrics {
            let (success, candidates, hits) = match &outcome {
                Ok((candidates, hits)) => (true, *candidates as u64, hits.len() as u64),
                Err(_) => (false, 0, 0),
            };
            self.metrics
                .record_search(policy, timer.stop(), success, candidates, hits);
        }

        let (candidates, hits) = outcome?;
        debug!(
            "query {raw_query:?} ({policy:?}): {candidates} candidates, {} returned",
            hits.len()
        );
        Ok(hits)
    }

    /// Matched plus terms of a document and its status.
    ///
    /// Returns an empty term list when any minus term matches. Fails with
    /// `InvalidArgument` on a malformed query and `OutOfRange` if `id` is not
    /// a live document.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with_policy(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// [`match_document`](Self::match_document) under an execution policy.
    pub fn match_document_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let status = self
            .index
            .document_data(id)
            .map(|data| data.status)
            .ok_or_else(|| LecternError::out_of_range(format!("document {id} is not indexed")))?;

        let matched = match policy {
            ExecutionPolicy::Sequential => match_terms(&self.index, &query, id),
            ExecutionPolicy::Parallel => self
                .thread_pool
                .install(|| match_terms_parallel(&self.index, &query, id)),
        };
        Ok((matched, status))
    }

    /// Current metrics snapshot.
    pub fn metrics(&self) -> SearchMetrics {
        self.metrics.snapshot()
    }

    /// Reset metrics.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = <&'a InvertedIndex as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.index.document_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let config = SearchServerConfig::default().with_thread_pool_size(2);
        let stop_words = StopWords::from_text("and in on with").unwrap();
        let mut server = SearchServer::with_config(stop_words, config).unwrap();
        server
            .add_document(1, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3])
            .unwrap();
        server
            .add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        server
            .add_document(3, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])
            .unwrap();
        server
            .add_document(4, "groomed starling eugene", DocumentStatus::Banned, &[9])
            .unwrap();
        server
    }

    fn ids(documents: &[Document]) -> Vec<DocumentId> {
        documents.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_find_top_documents() {
        let server = server();
        let results = server.find_top_documents("fluffy groomed cat").unwrap();
        assert_eq!(ids(&results), vec![2, 1, 3]);

        // relevance of doc 2: fluffy 0.5 * ln(4) + cat 0.25 * ln(2)
        let expected = 0.5 * 4.0_f64.ln() + 0.25 * 2.0_f64.ln();
        assert!((results[0].relevance - expected).abs() < 1e-9);
        assert_eq!(results[0].rating, 5);
    }

    #[test]
    fn test_find_top_documents_by_status() {
        let server = server();
        let results = server
            .find_top_documents_by_status("groomed", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(ids(&results), vec![4]);
    }

    #[test]
    fn test_find_top_documents_with_predicate() {
        let server = server();
        let results = server
            .find_top_documents_with("fluffy groomed cat", |id, _, _| id % 2 == 1)
            .unwrap();
        assert_eq!(ids(&results), vec![1, 3]);
    }

    #[test]
    fn test_policies_agree() {
        let server = server();
        for query in ["fluffy groomed cat", "cat -collar", "eugene", "with and"] {
            let sequential = server
                .find_top_documents_with_policy(ExecutionPolicy::Sequential, query)
                .unwrap();
            let parallel = server
                .find_top_documents_with_policy(ExecutionPolicy::Parallel, query)
                .unwrap();
            assert_eq!(ids(&sequential), ids(&parallel), "query {query:?}");
        }
    }

    #[test]
    fn test_match_document() {
        let server = server();
        let (terms, status) = server.match_document("fluffy cat dog", 2).unwrap();
        assert_eq!(terms, vec!["cat", "fluffy"]);
        assert_eq!(status, DocumentStatus::Actual);

        let (terms, _) = server.match_document("fluffy cat -tail", 2).unwrap();
        assert!(terms.is_empty());

        let (terms, status) = server
            .match_document_with_policy(ExecutionPolicy::Parallel, "eugene groomed", 4)
            .unwrap();
        assert_eq!(terms, vec!["eugene", "groomed"]);
        assert_eq!(status, DocumentStatus::Banned);
    }

    #[test]
    fn test_match_document_errors() {
        let server = server();
        assert!(server.match_document("cat", 100).unwrap_err().is_out_of_range());
        assert!(server.match_document("--cat", 1).unwrap_err().is_invalid_argument());
        // Query syntax is checked before the id.
        assert!(server.match_document("-", 100).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_metrics_recorded() {
        let server = server();
        server.find_top_documents("cat").unwrap();
        server
            .find_top_documents_with_policy(ExecutionPolicy::Parallel, "cat")
            .unwrap();
        assert!(server.find_top_documents("cat --dog").is_err());

        let metrics = server.metrics();
        assert_eq!(metrics.total_searches, 3);
        assert_eq!(metrics.successful_searches, 2);
        assert_eq!(metrics.failed_searches, 1);
        assert_eq!(metrics.parallel_searches, 1);
        assert_eq!(metrics.total_hits_returned, 4);

        server.reset_metrics();
        assert_eq!(server.metrics().total_searches, 0);
    }

    #[test]
    fn test_metrics_disabled() {
        let config = SearchServerConfig::default()
            .with_metrics(false)
            .with_thread_pool_size(1);
        let server = SearchServer::with_config(StopWords::new(), config).unwrap();
        server.find_top_documents("cat").unwrap();
        assert_eq!(server.metrics().total_searches, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchServerConfig::default().with_shard_count(0);
        assert!(SearchServer::with_config(StopWords::new(), config).is_err());
    }

    #[test]
    fn test_iteration_order() {
        let server = server();
        assert_eq!((&server).into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(server.document_ids().count(), server.document_count());
    }
}
