//! Error types for table parsing and loading

use thiserror::Error;

/// Main error type for doxidx operations
#[derive(Error, Debug)]
pub enum Error {
    /// Strict-mode syntax failure with byte position
    #[error("Syntax error at byte {position}: {message}")]
    Syntax {
        /// What went wrong
        message: String,
        /// Byte offset in the input
        position: usize,
    },

    /// The input parsed but does not have the expected table shape
    #[error("Malformed table: {0}")]
    Malformed(String),

    /// Duplicate token id within a single search shard
    #[error("Duplicate token '{0}' in search shard")]
    DuplicateToken(String),

    /// Filesystem failure while loading tables
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::core::tokenizer::ParseError> for Error {
    fn from(err: crate::core::tokenizer::ParseError) -> Self {
        Error::Syntax {
            message: err.message,
            position: err.position,
        }
    }
}

/// Result type alias for doxidx operations
pub type Result<T> = std::result::Result<T, Error>;
