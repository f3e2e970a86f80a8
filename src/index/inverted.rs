//! In-memory inverted index with forward and reverse postings.
//!
//! Every indexed document contributes its term frequencies twice:
//!
//! ```text
//! forward:  term        -> { document id -> tf }
//! reverse:  document id -> { term        -> tf }
//! ```
//!
//! The reverse direction makes removal and duplicate detection proportional
//! to the number of terms in a document instead of the size of the index.
//! Both directions hold exactly the same (term, document, tf) triples at all
//! times; stop words never enter either of them.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Keys;
use std::iter::Copied;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::TextAnalyzer;
use crate::analysis::stop_words::StopWords;
use crate::document::{DocumentData, DocumentId, DocumentStatus};
use crate::error::{LecternError, Result};

/// Term frequencies of one document, ordered by term.
pub type TermFrequencies = BTreeMap<String, f64>;

/// Summary statistics about an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of live documents.
    pub document_count: usize,
    /// Number of distinct indexed terms.
    pub term_count: usize,
    /// Number of (term, document) postings.
    pub posting_count: usize,
    /// Number of stop words.
    pub stop_word_count: usize,
}

/// In-memory inverted index.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    analyzer: TextAnalyzer,
    /// term -> document -> tf
    term_to_documents: BTreeMap<String, BTreeMap<DocumentId, f64>>,
    /// document -> term -> tf
    document_to_terms: BTreeMap<DocumentId, TermFrequencies>,
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl InvertedIndex {
    /// Create an empty index with the given stop words.
    pub fn new(stop_words: StopWords) -> Self {
        Self::with_analyzer(TextAnalyzer::new(Arc::new(stop_words)))
    }

    /// Create an empty index with a custom analyzer.
    pub fn with_analyzer(analyzer: TextAnalyzer) -> Self {
        InvertedIndex {
            analyzer,
            term_to_documents: BTreeMap::new(),
            document_to_terms: BTreeMap::new(),
            documents: BTreeMap::new(),
        }
    }

    /// The analyzer used for document text.
    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    /// Index a document.
    ///
    /// Fails with `InvalidArgument` if `id` is negative or already indexed, or
    /// if `text` contains a word with a control character. The index is left
    /// untouched on failure.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(LecternError::invalid_argument(format!(
                "document id {id} is negative"
            )));
        }
        if self.documents.contains_key(&id) {
            return Err(LecternError::invalid_argument(format!(
                "document id {id} is already indexed"
            )));
        }

        let terms = self.analyzer.analyze(text)?;

        let mut frequencies = TermFrequencies::new();
        if !terms.is_empty() {
            let inv_term_count = 1.0 / terms.len() as f64;
            for term in &terms {
                *frequencies.entry((*term).to_string()).or_insert(0.0) += inv_term_count;
            }
        }

        for (term, &tf) in &frequencies {
            self.term_to_documents
                .entry(term.clone())
                .or_default()
                .insert(id, tf);
        }

        debug!(
            "indexed document {id} with {} distinct terms ({status})",
            frequencies.len()
        );

        self.document_to_terms.insert(id, frequencies);
        self.documents.insert(id, DocumentData::new(ratings, status));

        Ok(())
    }

    /// Remove a document. Unknown ids are ignored.
    ///
    /// Terms left without any document are pruned from the forward postings.
    pub fn remove_document(&mut self, id: DocumentId) {
        let Some(frequencies) = self.document_to_terms.remove(&id) else {
            return;
        };

        for term in frequencies.keys() {
            if let Some(postings) = self.term_to_documents.get_mut(term) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.term_to_documents.remove(term);
                }
            }
        }
        self.documents.remove(&id);

        debug!("removed document {id}");
    }

    /// Term frequencies of a document, or an empty map for unknown ids.
    pub fn term_frequencies(&self, id: DocumentId) -> Cow<'_, TermFrequencies> {
        match self.document_to_terms.get(&id) {
            Some(frequencies) => Cow::Borrowed(frequencies),
            None => Cow::Owned(TermFrequencies::new()),
        }
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.term_to_documents.len()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> Copied<Keys<'_, DocumentId, DocumentData>> {
        self.documents.keys().copied()
    }

    /// Whether `id` is a live document.
    pub fn contains_document(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Stored metadata of a live document.
    pub fn document_data(&self, id: DocumentId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// Documents containing `term` with their term frequencies.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.term_to_documents.get(term)
    }

    /// Whether document `id` contains `term`.
    pub fn contains_term_in(&self, id: DocumentId, term: &str) -> bool {
        self.document_to_terms
            .get(&id)
            .is_some_and(|frequencies| frequencies.contains_key(term))
    }

    /// `ln(live documents / documents containing term)`, or `None` when the
    /// term is not indexed.
    pub fn inverse_document_frequency(&self, term: &str) -> Option<f64> {
        let postings = self.term_to_documents.get(term)?;
        if postings.is_empty() {
            return None;
        }
        Some((self.documents.len() as f64 / postings.len() as f64).ln())
    }

    /// Summary statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.documents.len(),
            term_count: self.term_to_documents.len(),
            posting_count: self.term_to_documents.values().map(BTreeMap::len).sum(),
            stop_word_count: self.analyzer.stop_words().len(),
        }
    }
}

impl<'a> IntoIterator for &'a InvertedIndex {
    type Item = DocumentId;
    type IntoIter = Copied<Keys<'a, DocumentId, DocumentData>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids()
    }
}
