//! Metrics collection for search operations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::search::config::ExecutionPolicy;

/// Metrics collected across top-documents queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMetrics {
    /// Total number of searches executed.
    pub total_searches: u64,

    /// Number of successful searches.
    pub successful_searches: u64,

    /// Number of failed searches (malformed queries).
    pub failed_searches: u64,

    /// Searches evaluated sequentially.
    pub sequential_searches: u64,

    /// Searches evaluated in parallel.
    pub parallel_searches: u64,

    /// Total execution time across all searches.
    pub total_execution_time: Duration,

    /// Average execution time per search.
    pub avg_execution_time: Duration,

    /// Maximum execution time observed.
    pub max_execution_time: Duration,

    /// Minimum execution time observed.
    pub min_execution_time: Duration,

    /// Total candidate documents ranked before truncation.
    pub total_candidates_ranked: u64,

    /// Total hits returned.
    pub total_hits_returned: u64,
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self {
            total_searches: 0,
            successful_searches: 0,
            failed_searches: 0,
            sequential_searches: 0,
            parallel_searches: 0,
            total_execution_time: Duration::ZERO,
            avg_execution_time: Duration::ZERO,
            max_execution_time: Duration::ZERO,
            min_execution_time: Duration::ZERO,
            total_candidates_ranked: 0,
            total_hits_returned: 0,
        }
    }
}

/// Thread-safe collector behind [`SearchMetrics`].
#[derive(Debug)]
pub struct SearchMetricsCollector {
    total_searches: AtomicU64,
    successful_searches: AtomicU64,
    failed_searches: AtomicU64,
    sequential_searches: AtomicU64,
    parallel_searches: AtomicU64,
    total_execution_nanos: AtomicU64,
    max_execution_nanos: AtomicU64,
    min_execution_nanos: AtomicU64,
    total_candidates_ranked: AtomicU64,
    total_hits_returned: AtomicU64,

    /// Start time for the collector.
    start_time: Instant,
}

impl SearchMetricsCollector {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            successful_searches: AtomicU64::new(0),
            failed_searches: AtomicU64::new(0),
            sequential_searches: AtomicU64::new(0),
            parallel_searches: AtomicU64::new(0),
            total_execution_nanos: AtomicU64::new(0),
            max_execution_nanos: AtomicU64::new(0),
            min_execution_nanos: AtomicU64::new(u64::MAX),
            total_candidates_ranked: AtomicU64::new(0),
            total_hits_returned: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a search execution.
    pub fn record_search(
        &self,
        policy: ExecutionPolicy,
        execution_time: Duration,
        success: bool,
        candidates_ranked: u64,
        hits_returned: u64,
    ) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);

        if success {
            self.successful_searches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_searches.fetch_add(1, Ordering::Relaxed);
        }

        match policy {
            ExecutionPolicy::Sequential => {
                self.sequential_searches.fetch_add(1, Ordering::Relaxed);
            }
            ExecutionPolicy::Parallel => {
                self.parallel_searches.fetch_add(1, Ordering::Relaxed);
            }
        }

        let nanos = execution_time.as_nanos() as u64;
        self.total_execution_nanos
            .fetch_add(nanos, Ordering::Relaxed);
        self.max_execution_nanos.fetch_max(nanos, Ordering::Relaxed);
        self.min_execution_nanos.fetch_min(nanos, Ordering::Relaxed);

        self.total_candidates_ranked
            .fetch_add(candidates_ranked, Ordering::Relaxed);
        self.total_hits_returned
            .fetch_add(hits_returned, Ordering::Relaxed);
    }

    /// Get the current metrics snapshot.
    pub fn snapshot(&self) -> SearchMetrics {
        let total_searches = self.total_searches.load(Ordering::Relaxed);
        let total_nanos = self.total_execution_nanos.load(Ordering::Relaxed);

        let avg_nanos = if total_searches > 0 {
            total_nanos / total_searches
        } else {
            0
        };

        let min_nanos = self.min_execution_nanos.load(Ordering::Relaxed);
        let min_duration = if min_nanos == u64::MAX {
            Duration::ZERO
        } else {
            Duration::from_nanos(min_nanos)
        };

        SearchMetrics {
            total_searches,
            successful_searches: self.successful_searches.load(Ordering::Relaxed),
            failed_searches: self.failed_searches.load(Ordering::Relaxed),
            sequential_searches: self.sequential_searches.load(Ordering::Relaxed),
            parallel_searches: self.parallel_searches.load(Ordering::Relaxed),
            total_execution_time: Duration::from_nanos(total_nanos),
            avg_execution_time: Duration::from_nanos(avg_nanos),
            max_execution_time: Duration::from_nanos(
                self.max_execution_nanos.load(Ordering::Relaxed),
            ),
            min_execution_time: min_duration,
            total_candidates_ranked: self.total_candidates_ranked.load(Ordering::Relaxed),
            total_hits_returned: self.total_hits_returned.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.total_searches.store(0, Ordering::Relaxed);
        self.successful_searches.store(0, Ordering::Relaxed);
        self.failed_searches.store(0, Ordering::Relaxed);
        self.sequential_searches.store(0, Ordering::Relaxed);
        self.parallel_searches.store(0, Ordering::Relaxed);
        self.total_execution_nanos.store(0, Ordering::Relaxed);
        self.max_execution_nanos.store(0, Ordering::Relaxed);
        self.min_execution_nanos.store(u64::MAX, Ordering::Relaxed);
        self.total_candidates_ranked.store(0, Ordering::Relaxed);
        self.total_hits_returned.store(0, Ordering::Relaxed);
    }

    /// Get the uptime of this collector.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for SearchMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed time.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
