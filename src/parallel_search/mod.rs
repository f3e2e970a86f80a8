//! Parallel evaluation for the search server.
//!
//! This module provides:
//! - A sharded concurrent map for accumulating relevance across workers
//! - Parallel counterparts of candidate collection and document matching
//! - Batch execution of many queries at once

pub mod batch;
pub mod concurrent_map;
pub mod engine;

pub use batch::{process_queries, process_queries_joined};
pub use concurrent_map::{Access, ConcurrentMap, ShardKey};
pub use engine::{find_all_documents_parallel, match_terms_parallel};
