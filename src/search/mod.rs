//! Search server: ranked retrieval over the inverted index.

pub mod config;
pub mod engine;
pub mod metrics;
pub mod ranking;

pub use self::config::{
    DEFAULT_REQUEST_WINDOW, DEFAULT_SHARD_COUNT, ExecutionPolicy, MAX_RESULT_DOCUMENT_COUNT,
    RELEVANCE_EPSILON, SearchServerConfig,
};
pub use self::engine::SearchServer;
pub use self::metrics::{SearchMetrics, SearchMetricsCollector, Timer};
pub use self::ranking::{compare_by_rank, rank_documents, top_documents};
