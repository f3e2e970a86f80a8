//! Text analysis for Lectern.
//!
//! Documents and queries go through the same pipeline: a [`Tokenizer`] splits
//! the raw text, every token is validated, and stop words are dropped.
//!
//! [`Tokenizer`]: tokenizer::Tokenizer

pub mod analyzer;
pub mod stop_words;
pub mod tokenizer;
