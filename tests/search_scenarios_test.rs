//! End-to-end search scenarios through the public server API.

use lectern::prelude::*;

fn pet_server() -> Result<SearchServer> {
    let mut server = SearchServer::new("and with")?;
    server.add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[1, 2, 3])?;
    server.add_document(3, "big cat nasty hair", DocumentStatus::Actual, &[1, 2, 8])?;
    server.add_document(4, "big dog cat Vladislav", DocumentStatus::Irrelevant, &[1, 3, 2])?;
    server.add_document(5, "big dog hamster Borya", DocumentStatus::Banned, &[1, 1, 1])?;
    Ok(server)
}

fn ids(documents: &[Document]) -> Vec<DocumentId> {
    documents.iter().map(|d| d.id).collect()
}

#[test]
fn two_matching_terms_outrank_one() -> Result<()> {
    let mut server = SearchServer::new("in the")?;
    server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])?;
    server.add_document(55, "dog in the park", DocumentStatus::Actual, &[3, 4, 5])?;

    let results = server.find_top_documents("dog walks in city park")?;
    assert_eq!(ids(&results), vec![55, 42]);
    assert_eq!(results[0].rating, 4);
    assert_eq!(results[1].rating, 2);
    assert!(results[0].relevance > results[1].relevance);
    Ok(())
}

#[test]
fn hyphen_inside_document_text_is_literal() -> Result<()> {
    let mut server = SearchServer::new("")?;
    server.add_document(1, "-cat doesn't like dog", DocumentStatus::Actual, &[])?;

    assert!(server.find_top_documents("in")?.is_empty());
    assert!(server.find_top_documents("cat")?.is_empty());

    // The stored term is `-cat`, so excluding `cat` does not hit it.
    let (terms, _) = server.match_document("like -cat", 1)?;
    assert_eq!(terms, vec!["like"]);
    Ok(())
}

#[test]
fn ratings_are_truncated_averages() -> Result<()> {
    let mut server = SearchServer::new("")?;
    server.add_document(42, "alpha", DocumentStatus::Actual, &[1, 2, 3])?;
    server.add_document(43, "alpha beta", DocumentStatus::Actual, &[])?;
    server.add_document(44, "alpha beta gamma", DocumentStatus::Actual, &[-7, 2])?;

    let results = server.find_top_documents("alpha beta gamma")?;
    let rating_of = |id| results.iter().find(|d| d.id == id).map(|d| d.rating);
    assert_eq!(rating_of(42), Some(2));
    assert_eq!(rating_of(43), Some(0));
    assert_eq!(rating_of(44), Some(-2));
    Ok(())
}

#[test]
fn malformed_queries_are_rejected() -> Result<()> {
    let server = pet_server()?;
    for query in ["-", "cat -", "--cat", "cat\u{1}", "", "   "] {
        let err = server.find_top_documents(query).unwrap_err();
        assert!(err.is_invalid_argument(), "query {query:?}");
    }
    Ok(())
}

#[test]
fn status_and_predicate_filtering() -> Result<()> {
    let server = pet_server()?;

    assert_eq!(ids(&server.find_top_documents("big")?), vec![3]);
    assert_eq!(
        ids(&server.find_top_documents_by_status("big", DocumentStatus::Banned)?),
        vec![5]
    );
    assert_eq!(
        ids(&server.find_top_documents_by_status("big", DocumentStatus::Removed)?),
        Vec::<DocumentId>::new()
    );

    let even = server.find_top_documents_with("big funny", |id, _, _| id % 2 == 0)?;
    assert_eq!(ids(&even), vec![2, 4]);

    let rated = server.find_top_documents_with("big funny", |_, _, rating| rating >= 3)?;
    assert_eq!(ids(&rated), vec![1, 3]);
    Ok(())
}

#[test]
fn minus_terms_exclude_documents() -> Result<()> {
    let server = pet_server()?;

    let results = server.find_top_documents("funny pet -rat")?;
    assert_eq!(ids(&results), vec![2]);

    let results = server.find_top_documents("hair -hair")?;
    assert!(results.is_empty());

    let (terms, status) = server.match_document("funny nasty -curly", 1)?;
    assert_eq!(terms, vec!["funny", "nasty"]);
    assert_eq!(status, DocumentStatus::Actual);
    Ok(())
}

#[test]
fn at_most_five_results() -> Result<()> {
    let mut server = SearchServer::new("")?;
    for id in 0..12 {
        let text = format!("common word{id}");
        server.add_document(id, &text, DocumentStatus::Actual, &[id])?;
    }
    server.add_document(100, "unrelated", DocumentStatus::Actual, &[50])?;

    let results = server.find_top_documents("common")?;
    // Equal relevance: highest ratings first.
    assert_eq!(ids(&results), vec![11, 10, 9, 8, 7]);
    Ok(())
}

#[test]
fn removal_is_idempotent_and_affects_idf() -> Result<()> {
    let mut server = pet_server()?;
    let before = server.find_top_documents("curly")?;
    assert_eq!(ids(&before), vec![2]);

    server.remove_document(2);
    server.remove_document(2);
    server.remove_document(1000);

    assert_eq!(server.document_count(), 4);
    assert!(server.find_top_documents("curly")?.is_empty());
    assert!(server.term_frequencies(2).is_empty());
    assert!(server.match_document("curly", 2).unwrap_err().is_out_of_range());

    // Re-adding a removed id is allowed; re-adding a live id is not.
    server.add_document(2, "curly again", DocumentStatus::Actual, &[])?;
    assert!(server
        .add_document(2, "curly twice", DocumentStatus::Actual, &[])
        .unwrap_err()
        .is_invalid_argument());
    Ok(())
}

#[test]
fn term_frequencies_sum_to_one() -> Result<()> {
    let server = pet_server()?;
    for id in &server {
        let frequencies = server.term_frequencies(id);
        let total: f64 = frequencies.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "document {id}");
    }
    Ok(())
}
