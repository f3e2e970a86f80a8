//! Bulk query execution.
//!
//! Queries are evaluated concurrently on the server's thread pool, each one
//! with the sequential policy. Results keep the order of the input queries.

use rayon::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::search::SearchServer;

/// Run every query and return one result list per query, in input order.
///
/// Fails with the first error in input order if any query is malformed.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    server.thread_pool().install(|| {
        queries
            .par_iter()
            .map(|query| server.find_top_documents(query.as_ref()))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    })
}

/// Run every query and concatenate the result lists in input order.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentId, DocumentStatus};

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (i, text) in texts.iter().enumerate() {
            server
                .add_document(i as DocumentId + 1, text, DocumentStatus::Actual, &[1, 2])
                .unwrap();
        }
        server
    }

    #[test]
    fn test_process_queries_keeps_input_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries).unwrap();

        assert_eq!(results.len(), 3);
        for (query, found) in queries.iter().zip(&results) {
            let expected = server.find_top_documents(query).unwrap();
            assert_eq!(found, &expected);
        }
        assert_eq!(results[0].len(), 3);
        assert_eq!(results[1].len(), 5);
        assert_eq!(results[2].len(), 2);
    }

    #[test]
    fn test_process_queries_joined() {
        let server = server();
        let queries = vec![
            "nasty rat -not".to_string(),
            "not very funny nasty pet".to_string(),
            "curly hair".to_string(),
        ];
        let joined = process_queries_joined(&server, &queries).unwrap();
        let ids: Vec<DocumentId> = joined.iter().map(|d| d.id).collect();

        let expected: Vec<DocumentId> = process_queries(&server, &queries)
            .unwrap()
            .into_iter()
            .flatten()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, expected);
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_malformed_query_fails_batch() {
        let server = server();
        let err = process_queries(&server, &["rat", "--pet", "hair"]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_empty_batch() {
        let server = server();
        let queries: [&str; 0] = [];
        assert!(process_queries(&server, &queries).unwrap().is_empty());
        assert!(process_queries_joined(&server, &queries).unwrap().is_empty());
    }
}
