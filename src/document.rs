//! Document identity, status and ranked-result types.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Caller-assigned document identifier. Valid ids are non-negative.
pub type DocumentId = i32;

/// Lifecycle status attached to a document when it is indexed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Current, searchable by default.
    #[default]
    Actual,
    /// Indexed but not considered relevant.
    Irrelevant,
    /// Blocked from normal results.
    Banned,
    /// Logically removed by its owner.
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        };
        f.write_str(name)
    }
}

/// Metadata stored for every live document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    /// Integer average of the ratings supplied at insertion.
    pub rating: i32,
    /// Status supplied at insertion.
    pub status: DocumentStatus,
}

impl DocumentData {
    /// Build metadata from a raw rating list.
    pub fn new(ratings: &[i32], status: DocumentStatus) -> Self {
        DocumentData {
            rating: compute_average_rating(ratings),
            status,
        }
    }
}

/// A ranked search hit.
///
/// `relevance` only exists for the query that produced the hit; it is never
/// stored in the index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: DocumentId,
    /// TF-IDF relevance for the query.
    pub relevance: f64,
    /// Stored rating of the document.
    pub rating: i32,
}

impl Document {
    /// Create a new ranked document.
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Integer average of `ratings`, truncating toward zero. Empty input yields 0.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(compute_average_rating(&[1, 2, 3]), 2);
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[7, 2, 7]), 5);
        // Truncation toward zero, not flooring.
        assert_eq!(compute_average_rating(&[-7, -2, -7]), -5);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn test_document_display() {
        let doc = Document::new(55, 0.5, 4);
        assert_eq!(
            doc.to_string(),
            "{ document_id = 55, relevance = 0.5, rating = 4 }"
        );
    }

    #[test]
    fn test_status_serde_spelling() {
        let json = serde_json::to_string(&DocumentStatus::Banned).unwrap();
        assert_eq!(json, "\"banned\"");

        let status: DocumentStatus = serde_json::from_str("\"irrelevant\"").unwrap();
        assert_eq!(status, DocumentStatus::Irrelevant);
        assert_eq!(DocumentStatus::default(), DocumentStatus::Actual);
    }
}
