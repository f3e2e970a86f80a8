//! Parallel query evaluation.
//!
//! The plus-term pass fans out per term and, inside each term, per posting;
//! every worker adds `tf * idf` into a shared [`ConcurrentMap`]. Only after
//! that pass has joined does the minus-term pass fan out the same way and
//! delete excluded documents. The merged map is id-ordered, so candidates
//! reach the ranker in the same order as in sequential evaluation.
//!
//! Callers run these functions inside the server's thread pool.

use log::trace;
use rayon::prelude::*;

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::parallel_search::concurrent_map::ConcurrentMap;
use crate::query::Query;
use crate::search::ranking::collect_documents;

/// Parallel counterpart of [`find_all_documents`](crate::search::ranking::find_all_documents).
pub fn find_all_documents_parallel<P>(
    index: &InvertedIndex,
    query: &Query,
    predicate: &P,
    shard_count: usize,
) -> Result<Vec<Document>>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let relevance: ConcurrentMap<DocumentId, f64> = ConcurrentMap::new(shard_count)?;

    trace!(
        "parallel evaluation of {} plus and {} minus terms over {shard_count} shards",
        query.plus_terms.len(),
        query.minus_terms.len()
    );

    query.plus_terms.par_iter().for_each(|term| {
        let (Some(postings), Some(idf)) =
            (index.postings(term), index.inverse_document_frequency(term))
        else {
            return;
        };
        postings.par_iter().for_each(|(&id, &tf)| {
            let Some(data) = index.document_data(id) else {
                return;
            };
            if predicate(id, data.status, data.rating) {
                *relevance.access(id) += tf * idf;
            }
        });
    });

    query.minus_terms.par_iter().for_each(|term| {
        if let Some(postings) = index.postings(term) {
            postings.par_iter().for_each(|(id, _)| {
                relevance.delete(id);
            });
        }
    });

    Ok(collect_documents(index, relevance.into_ordered_map()))
}

/// Parallel counterpart of [`match_terms`](crate::search::ranking::match_terms).
pub fn match_terms_parallel(index: &InvertedIndex, query: &Query, id: DocumentId) -> Vec<String> {
    if query
        .minus_terms
        .par_iter()
        .any(|term| index.contains_term_in(id, term))
    {
        return Vec::new();
    }

    let mut matched: Vec<String> = query
        .plus_terms
        .par_iter()
        .filter(|term| index.contains_term_in(id, term))
        .cloned()
        .collect();
    matched.par_sort_unstable();
    matched.dedup();
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stop_words::StopWords;
    use crate::search::ranking::{find_all_documents, match_terms};

    fn sample_index() -> InvertedIndex {
        let mut index = InvertedIndex::new(StopWords::from_text("and with").unwrap());
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
            "white cat and fancy collar",
            "fluffy cat fluffy tail",
            "groomed dog expressive eyes",
        ];
        for (i, text) in texts.iter().enumerate() {
            let status = if i % 3 == 0 {
                DocumentStatus::Banned
            } else {
                DocumentStatus::Actual
            };
            index
                .add_document(i as DocumentId, text, status, &[i as i32, 1])
                .unwrap();
        }
        index
    }

    fn query(plus: &[&str], minus: &[&str]) -> Query {
        let mut query = Query::new();
        for term in plus {
            query.add_plus_term(*term);
        }
        for term in minus {
            query.add_minus_term(*term);
        }
        query
    }

    #[test]
    fn test_matches_sequential_evaluation() {
        let index = sample_index();
        let queries = [
            query(&["curly", "nasty", "cat"], &[]),
            query(&["curly", "nasty", "cat"], &["not"]),
            query(&["rat", "pet"], &["hair"]),
            query(&["unknown"], &[]),
            query(&[], &["rat"]),
        ];

        for query in &queries {
            for shard_count in [1, 3, 7, 64] {
                let sequential = find_all_documents(&index, query, &|_, _, _| true);
                let parallel =
                    find_all_documents_parallel(&index, query, &|_, _, _| true, shard_count)
                        .unwrap();

                assert_eq!(sequential.len(), parallel.len());
                for (s, p) in sequential.iter().zip(&parallel) {
                    assert_eq!(s.id, p.id);
                    assert_eq!(s.rating, p.rating);
                    assert!((s.relevance - p.relevance).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_predicate_applied() {
        let index = sample_index();
        let query = query(&["rat", "pet"], &[]);
        let actual = find_all_documents_parallel(
            &index,
            &query,
            &|_, status, _| status == DocumentStatus::Actual,
            7,
        )
        .unwrap();
        assert!(actual.iter().all(|d| d.id % 3 != 0));
        assert!(!actual.is_empty());
    }

    #[test]
    fn test_exclusion_wins() {
        let index = sample_index();
        let query = query(&["rat"], &["rat"]);
        let found = find_all_documents_parallel(&index, &query, &|_, _, _| true, 7).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_zero_shards_is_an_error() {
        let index = sample_index();
        let query = query(&["rat"], &[]);
        assert!(find_all_documents_parallel(&index, &query, &|_, _, _| true, 0).is_err());
    }

    #[test]
    fn test_match_terms_parallel() {
        let index = sample_index();
        let q = query(&["pet", "rat", "funny", "cat"], &[]);
        assert_eq!(match_terms_parallel(&index, &q, 0), vec!["funny", "pet", "rat"]);
        assert_eq!(match_terms_parallel(&index, &q, 0), match_terms(&index, &q, 0));

        let q = query(&["pet", "rat"], &["nasty"]);
        assert!(match_terms_parallel(&index, &q, 0).is_empty());
    }
}
