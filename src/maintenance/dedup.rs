//! Duplicate document removal.
//!
//! Two documents are duplicates when they contain the same set of terms,
//! regardless of how often each term occurs or in which order.

use std::collections::BTreeSet;

use ahash::AHashSet;
use log::info;

use crate::document::DocumentId;
use crate::search::SearchServer;

/// Remove every document whose term set was already seen at a lower id.
///
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut seen: AHashSet<BTreeSet<String>> = AHashSet::new();
    let mut duplicates = Vec::new();

    for id in server.document_ids() {
        let terms: BTreeSet<String> = server.term_frequencies(id).keys().cloned().collect();
        if !seen.insert(terms) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        info!("Found duplicate document id {id}");
        server.remove_document(id);
    }
    duplicates
}
