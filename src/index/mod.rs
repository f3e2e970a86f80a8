//! Index module for Lectern.
//!
//! This module provides the in-memory inverted index: forward postings
//! (term to documents), reverse postings (document to terms) and per-document
//! metadata.

pub mod inverted;

// Re-export commonly used types
pub use inverted::{IndexStats, InvertedIndex, TermFrequencies};
