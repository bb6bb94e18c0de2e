//! Lifecycle status of a tokenizer session.

use std::fmt;

/// Observable state of whatever owns a tokenizer instance.
///
/// Only [`SessionStatus::Ready`] permits tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing has been loaded yet
    Uninitialized,
    /// A load is in flight
    Loading,
    /// Vocabulary and merges are available
    Ready,
    /// The last load attempt failed
    Failed,
}

impl SessionStatus {
    /// Whether tokenization is permitted in this state.
    #[inline]
    pub fn is_ready(self) -> bool {
        self == SessionStatus::Ready
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Uninitialized => "uninitialized",
            SessionStatus::Loading => "loading",
            SessionStatus::Ready => "ready",
            SessionStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}
