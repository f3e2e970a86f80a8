//! # Lectern
//!
//! An in-memory full-text document index with TF-IDF ranked retrieval.
//!
//! ## Features
//!
//! - Plus/minus keyword queries with stop-word filtering
//! - Status and predicate filtering of results
//! - Sequential or parallel query evaluation with identical results
//! - Duplicate document removal, pagination and request tracking
//! - A command line harness over JSONL document files

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod maintenance;
pub mod parallel_search;
pub mod query;
pub mod search;
pub mod util;

pub mod prelude {
    pub use crate::document::{Document, DocumentId, DocumentStatus};
    pub use crate::error::{LecternError, Result};
    pub use crate::search::{ExecutionPolicy, SearchServer, SearchServerConfig};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
