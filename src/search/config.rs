//! Configuration for the search server.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{LecternError, Result};

/// Maximum number of documents returned by a top-documents query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Default number of shards in the parallel relevance accumulator.
pub const DEFAULT_SHARD_COUNT: usize = 7;

/// Default size of the request history window (one request per minute of a day).
pub const DEFAULT_REQUEST_WINDOW: usize = 1440;

/// How a query is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionPolicy {
    /// Single-threaded evaluation.
    #[default]
    Sequential,
    /// Fan out over query terms and posting lists on the server's thread pool.
    Parallel,
}

/// Configuration for [`SearchServer`](crate::search::SearchServer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchServerConfig {
    /// Number of independently locked shards used to accumulate relevance
    /// in parallel mode.
    pub shard_count: usize,

    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Whether to collect search metrics.
    pub enable_metrics: bool,

    /// Number of most recent requests tracked by a request queue.
    pub request_window: usize,
}

impl Default for SearchServerConfig {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            thread_pool_size: None,
            enable_metrics: true,
            request_window: DEFAULT_REQUEST_WINDOW,
        }
    }
}

impl SearchServerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shard count.
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Set the thread pool size.
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Set whether to collect metrics.
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Set the request history window.
    pub fn with_request_window(mut self, window: usize) -> Self {
        self.request_window = window;
        self
    }

    /// Number of worker threads the server will start.
    pub fn effective_thread_pool_size(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get)
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<()> {
        if self.shard_count == 0 {
            return Err(LecternError::invalid_config("shard_count must be positive"));
        }
        if self.thread_pool_size == Some(0) {
            return Err(LecternError::invalid_config(
                "thread_pool_size must be positive",
            ));
        }
        if self.request_window == 0 {
            return Err(LecternError::invalid_config(
                "request_window must be positive",
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SearchServerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
