//! Error types for pattern file parsing.

use thiserror::Error;

/// Errors from parsing pattern text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatError {
    /// A data line does not match the seven-field grammar.
    #[error("malformed pattern line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number in the input text.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, PatError>;
