//! Structured queries.
//!
//! A raw query string such as `"fluffy cat -collar"` is parsed by
//! [`QueryParser`] into a [`Query`] holding the required ("plus") terms and
//! the excluded ("minus") terms.
//!
//! [`QueryParser`]: parser::QueryParser

use std::collections::BTreeSet;

pub mod parser;

pub use parser::QueryParser;

/// A parsed query: two ordered, deduplicated term sets.
///
/// A term may occur in both sets; the exclusion wins when documents are
/// matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Terms contributing to relevance.
    pub plus_terms: BTreeSet<String>,
    /// Terms whose presence removes a document from the results.
    pub minus_terms: BTreeSet<String>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required term.
    pub fn add_plus_term(&mut self, term: impl Into<String>) {
        self.plus_terms.insert(term.into());
    }

    /// Add an excluded term.
    pub fn add_minus_term(&mut self, term: impl Into<String>) {
        self.minus_terms.insert(term.into());
    }

    /// True when neither set holds a term.
    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }
}
