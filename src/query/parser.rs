//! Query string parser.
//!
//! The syntax is a space-separated list of words:
//! - `word`: required term, contributes to relevance
//! - `-word`: excluded term, drops every document containing it
//!
//! Stop words are ignored after the leading `-` is stripped. A bare `-`, a
//! word starting with `--`, and any word containing a control character are
//! rejected.

use crate::analysis::analyzer::{TextAnalyzer, is_valid_term};
use crate::error::{LecternError, Result};
use crate::query::Query;

/// A single classified query word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWord<'a> {
    /// The term with any leading `-` removed.
    pub text: &'a str,
    /// Whether the word was written as `-word`.
    pub is_minus: bool,
    /// Whether the term is a stop word.
    pub is_stop: bool,
}

/// Parses raw query text into a [`Query`].
#[derive(Debug, Clone)]
pub struct QueryParser {
    analyzer: TextAnalyzer,
}

impl QueryParser {
    /// Create a parser sharing the index's analyzer.
    pub fn new(analyzer: TextAnalyzer) -> Self {
        QueryParser { analyzer }
    }

    /// Parse a query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lectern::analysis::analyzer::TextAnalyzer;
    /// use lectern::analysis::stop_words::StopWords;
    /// use lectern::query::QueryParser;
    ///
    /// let stop_words = Arc::new(StopWords::from_text("in the").unwrap());
    /// let parser = QueryParser::new(TextAnalyzer::new(stop_words));
    ///
    /// let query = parser.parse("cat in the -city cat").unwrap();
    /// assert_eq!(query.plus_terms.len(), 1);
    /// assert!(query.minus_terms.contains("city"));
    /// ```
    pub fn parse(&self, text: &str) -> Result<Query> {
        let words = self.analyzer.tokenize(text);
        if words.is_empty() {
            return Err(LecternError::invalid_argument("query is empty"));
        }

        let mut query = Query::new();
        for word in words {
            let word = self.parse_word(word)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.add_minus_term(word.text);
            } else {
                query.add_plus_term(word.text);
            }
        }
        Ok(query)
    }

    /// Classify a single query word.
    pub fn parse_word<'a>(&self, text: &'a str) -> Result<QueryWord<'a>> {
        if text.is_empty() {
            return Err(LecternError::invalid_argument("query word is empty"));
        }

        let (term, is_minus) = match text.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        if term.is_empty() || term.starts_with('-') || !is_valid_term(term) {
            return Err(LecternError::invalid_argument(format!(
                "query word {text:?} is invalid"
            )));
        }

        Ok(QueryWord {
            text: term,
            is_minus,
            is_stop: self.analyzer.is_stop_word(term),
        })
    }
}
