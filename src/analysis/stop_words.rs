//! Stop word set.
//!
//! Stop words are excluded both from indexing and from query matching. The
//! set is fixed when the index is constructed.
//!
//! # Examples
//!
//! ```
//! use lectern::analysis::stop_words::StopWords;
//!
//! let stop_words = StopWords::from_text("in the  on").unwrap();
//! assert_eq!(stop_words.len(), 3);
//! assert!(stop_words.is_stop_word("the"));
//! assert!(!stop_words.is_stop_word("cat"));
//! ```

use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::analysis::analyzer::is_valid_term;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::{LecternError, Result};

/// An immutable set of stop words.
#[derive(Clone, Debug, Default)]
pub struct StopWords {
    words: AHashSet<String>,
}

impl StopWords {
    /// Create an empty stop word set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stop word set from any collection of words.
    ///
    /// Empty entries are skipped. Fails with `InvalidArgument` if a word
    /// contains a control character.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AHashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_term(word) {
                return Err(LecternError::invalid_argument(format!(
                    "stop word {word:?} contains a control character"
                )));
            }
            set.insert(word.to_string());
        }
        Ok(StopWords { words: set })
    }

    /// Build a stop word set from space-separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(WhitespaceTokenizer::new().tokenize(text))
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The stop words in ascending order.
    pub fn sorted(&self) -> BTreeSet<&str> {
        self.words.iter().map(String::as_str).collect()
    }
}
