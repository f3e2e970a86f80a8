//! Error types for the Lectern library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`LecternError`] enum. Lookups of absent documents are not errors: removing
//! or inspecting an unknown id yields an empty result instead.
//!
//! # Examples
//!
//! ```
//! use lectern::error::{LecternError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LecternError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lectern operations.
#[derive(Error, Debug)]
pub enum LecternError {
    /// A caller-supplied value was rejected (bad document id, malformed
    /// query token, invalid stop word, bad configuration).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A document id that is not live was requested where one is required.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// The worker thread pool could not be built.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// I/O errors (reading document or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with LecternError.
pub type Result<T> = std::result::Result<T, LecternError>;

impl LecternError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LecternError::InvalidArgument(msg.into())
    }

    /// Create a new out of range error.
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        LecternError::OutOfRange(msg.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        LecternError::ThreadPool(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LecternError::InvalidArgument(format!("invalid configuration: {}", msg.into()))
    }

    /// Whether this error reports a rejected argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LecternError::InvalidArgument(_))
    }

    /// Whether this error reports a non-live document id.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, LecternError::OutOfRange(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LecternError::invalid_argument("negative document id");
        assert_eq!(error.to_string(), "Invalid argument: negative document id");
        assert!(error.is_invalid_argument());

        let error = LecternError::out_of_range("document 7 is not indexed");
        assert_eq!(error.to_string(), "Out of range: document 7 is not indexed");
        assert!(error.is_out_of_range());

        let error = LecternError::invalid_config("shard_count must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid argument: invalid configuration: shard_count must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let lectern_error = LecternError::from(io_error);

        match lectern_error {
            LecternError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
