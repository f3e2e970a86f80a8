//! TF-IDF candidate accumulation and top-N ranking.
//!
//! Candidates are accumulated per document as `sum(tf * idf)` over the
//! query's plus terms, restricted to documents accepted by the caller's
//! predicate. Documents containing any minus term are then dropped.
//!
//! Ranking orders by descending relevance, except that relevances closer than
//! [`RELEVANCE_EPSILON`] are ordered by descending rating. That comparison is
//! not transitive, so instead of a full sort the ranker repeatedly selects the
//! best remaining candidate in a single left-to-right scan. The selection is
//! stable: candidates arrive in ascending id order and full ties keep it.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::search::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

/// Compare two hits by rank: `Less` means `lhs` ranks higher.
pub fn compare_by_rank(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance
            .partial_cmp(&lhs.relevance)
            .unwrap_or(Ordering::Equal)
    }
}

/// Keep the best `limit` candidates in rank order.
pub fn top_documents(mut candidates: Vec<Document>, limit: usize) -> Vec<Document> {
    let mut ranked = Vec::with_capacity(limit.min(candidates.len()));
    while ranked.len() < limit && !candidates.is_empty() {
        let mut best = 0;
        for (i, candidate) in candidates.iter().enumerate().skip(1) {
            if compare_by_rank(candidate, &candidates[best]) == Ordering::Less {
                best = i;
            }
        }
        ranked.push(candidates.remove(best));
    }
    ranked
}

/// Rank candidates and truncate to [`MAX_RESULT_DOCUMENT_COUNT`].
pub fn rank_documents(candidates: Vec<Document>) -> Vec<Document> {
    top_documents(candidates, MAX_RESULT_DOCUMENT_COUNT)
}

/// Turn an id-ordered relevance map into hits carrying stored ratings.
pub fn collect_documents(
    index: &InvertedIndex,
    relevance: BTreeMap<DocumentId, f64>,
) -> Vec<Document> {
    relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            index
                .document_data(id)
                .map(|data| Document::new(id, relevance, data.rating))
        })
        .collect()
}

/// Every document matching `query` and `predicate`, in ascending id order.
pub fn find_all_documents<P>(index: &InvertedIndex, query: &Query, predicate: &P) -> Vec<Document>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();

    for term in &query.plus_terms {
        let (Some(postings), Some(idf)) =
            (index.postings(term), index.inverse_document_frequency(term))
        else {
            continue;
        };
        for (&id, &tf) in postings {
            let Some(data) = index.document_data(id) else {
                continue;
            };
            if predicate(id, data.status, data.rating) {
                *relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }
    }

    for term in &query.minus_terms {
        if let Some(postings) = index.postings(term) {
            for id in postings.keys() {
                relevance.remove(id);
            }
        }
    }

    collect_documents(index, relevance)
}

/// Matched plus terms of a live document, or nothing if a minus term matches.
pub fn match_terms(index: &InvertedIndex, query: &Query, id: DocumentId) -> Vec<String> {
    if query
        .minus_terms
        .iter()
        .any(|term| index.contains_term_in(id, term))
    {
        return Vec::new();
    }
    query
        .plus_terms
        .iter()
        .filter(|term| index.contains_term_in(id, term))
        .cloned()
        .collect()
}
