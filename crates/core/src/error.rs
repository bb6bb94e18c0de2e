//! Error types for the chatbpe tokenizer.

use crate::core::SessionStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Tokenization requested before the tokenizer reached the ready state
    #[error("Tokenizer not initialized (session is {status})")]
    NotInitialized { status: SessionStatus },

    /// The tokenizer resource could not be fetched
    #[error("Network error: {0}")]
    Network(String),

    /// The tokenizer resource was fetched but is not usable
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// A merge entry that is not exactly two space-separated tokens
    #[error("Malformed merge rule at index {index}: {entry:?}")]
    MalformedMergeRule { index: usize, entry: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A previous load failed and no new attempt has been made
    #[error("Tokenizer load failed: {0}")]
    LoadFailed(String),
}

impl TokenizerError {
    /// Whether this error was produced while loading the tokenizer resource.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            TokenizerError::Network(_)
                | TokenizerError::Parse(_)
                | TokenizerError::Io { .. }
                | TokenizerError::MalformedMergeRule { .. }
                | TokenizerError::LoadFailed(_)
        )
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_message() {
        let err = TokenizerError::NotInitialized {
            status: SessionStatus::Loading,
        };
        assert_eq!(
            err.to_string(),
            "Tokenizer not initialized (session is loading)"
        );
        assert!(!err.is_load_failure());
    }

    #[test]
    fn test_load_failure_classification() {
        assert!(TokenizerError::Network("refused".into()).is_load_failure());
        assert!(TokenizerError::MalformedMergeRule {
            index: 3,
            entry: "abc".into()
        }
        .is_load_failure());
        assert!(!TokenizerError::InvalidConfig("x".into()).is_load_failure());
    }
}
