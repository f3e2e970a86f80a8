//! Analyzer that combines a tokenizer with term validation and stop words.
//!
//! The analyzer applies processing in this order:
//! 1. Tokenizer: splits text into tokens
//! 2. Validation: every token must be a valid term
//! 3. Stop words: tokens in the stop word set are dropped
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use lectern::analysis::analyzer::TextAnalyzer;
//! use lectern::analysis::stop_words::StopWords;
//!
//! let stop_words = Arc::new(StopWords::from_text("in the").unwrap());
//! let analyzer = TextAnalyzer::new(stop_words);
//!
//! let terms = analyzer.analyze("cat in the city").unwrap();
//! assert_eq!(terms, vec!["cat", "city"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::stop_words::StopWords;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::{LecternError, Result};

/// Returns `true` if `word` contains no control character (U+0000..U+001F).
pub fn is_valid_term(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Tokenizer plus stop word filtering, shared by the index and the query parser.
#[derive(Clone)]
pub struct TextAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    stop_words: Arc<StopWords>,
}

impl fmt::Debug for TextAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

impl TextAnalyzer {
    /// Create an analyzer using the whitespace tokenizer.
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        Self::with_tokenizer(Arc::new(WhitespaceTokenizer::new()), stop_words)
    }

    /// Create an analyzer with a custom tokenizer.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>, stop_words: Arc<StopWords>) -> Self {
        TextAnalyzer {
            tokenizer,
            stop_words,
        }
    }

    /// Split text into raw tokens without validation or filtering.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.tokenizer.tokenize(text)
    }

    /// Tokenize, validate and drop stop words.
    ///
    /// Fails with `InvalidArgument` on the first token containing a control
    /// character, whether or not it would have been a stop word.
    pub fn analyze<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut terms = Vec::new();
        for word in self.tokenizer.tokenize(text) {
            if !is_valid_term(word) {
                return Err(LecternError::invalid_argument(format!(
                    "word {word:?} contains a control character"
                )));
            }
            if !self.stop_words.is_stop_word(word) {
                terms.push(word);
            }
        }
        Ok(terms)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.is_stop_word(word)
    }

    /// The stop word set.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }
}
