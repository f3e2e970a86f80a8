//! Tokenizer implementations for text analysis.

/// Trait for tokenizers that split text into tokens.
///
/// Tokens borrow from the input, so tokenizing is allocation-free apart from
/// the returned vector. Calling `tokenize` again on the same text yields the
/// same sequence.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on the ASCII space character.
///
/// Runs of spaces are collapsed. Other whitespace (tabs, newlines) is kept
/// inside the token, where term validation rejects it as a control character.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(' ').filter(|word| !word.is_empty()).collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
