//! Session-scoped tokenizer ownership.
//!
//! A chat session builds its tokenizer lazily, on first need, and keeps it
//! for the session's lifetime. `TokenizerSession` makes that lifecycle an
//! explicit state machine:
//!
//! ```text
//! Uninitialized --ensure_loaded--> Loading --ok--> Ready
//!                                     |
//!                                     +--err--> Failed --ensure_loaded--> Loading
//! ```
//!
//! Tokenization is synchronous and only permitted in `Ready`. In any other
//! state, including while a load is in flight, it fails immediately with
//! `NotInitialized` instead of waiting. Only `ensure_loaded` suspends.

use crate::config::TokenizerConfig;
use crate::io::{TokenizerLoader, VocabularySource};
use crate::tokenizer::Tokenizer;
use chatbpe_core::{MergeTable, Result, SessionStatus, Token, TokenizerError, Vocabulary};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

enum State {
    Uninitialized,
    Loading,
    Ready(Arc<Tokenizer>),
    Failed(String),
}

impl State {
    fn status(&self) -> SessionStatus {
        match self {
            State::Uninitialized => SessionStatus::Uninitialized,
            State::Loading => SessionStatus::Loading,
            State::Ready(_) => SessionStatus::Ready,
            State::Failed(_) => SessionStatus::Failed,
        }
    }
}

/// Owner of a lazily loaded tokenizer.
pub struct TokenizerSession {
    source: Option<Box<dyn VocabularySource>>,
    state: RwLock<State>,
    /// Serializes loads; waiters queue here instead of starting their own
    load_lock: Mutex<()>,
    /// Incremented every time a load attempt finishes
    attempts: AtomicU64,
}

impl TokenizerSession {
    /// Create a session that loads from `source` on first need.
    pub fn new(source: impl VocabularySource + 'static) -> Self {
        Self::with_source(Some(Box::new(source)))
    }

    /// Create a session backed by a [`TokenizerLoader`] for `config`.
    pub fn from_config(config: TokenizerConfig) -> Result<Self> {
        Ok(Self::new(TokenizerLoader::new(config)?))
    }

    /// Create a session without a source. It only becomes ready through
    /// [`TokenizerSession::initialize`].
    pub fn detached() -> Self {
        Self::with_source(None)
    }

    fn with_source(source: Option<Box<dyn VocabularySource>>) -> Self {
        Self {
            source,
            state: RwLock::new(State::Uninitialized),
            load_lock: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: State) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        debug!(from = %state.status(), to = %next.status(), "tokenizer session transition");
        *state = next;
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.read_state().status()
    }

    /// Message of the last failed load, if the session is in `Failed`.
    pub fn last_error(&self) -> Option<String> {
        match &*self.read_state() {
            State::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Install an already loaded vocabulary and merge table.
    pub fn initialize(&self, vocab: Vocabulary, merges: MergeTable) -> Arc<Tokenizer> {
        let tokenizer = Arc::new(Tokenizer::initialize(vocab, merges));
        self.set_state(State::Ready(Arc::clone(&tokenizer)));
        tokenizer
    }

    /// The tokenizer, if the session is ready.
    pub fn tokenizer(&self) -> Result<Arc<Tokenizer>> {
        match &*self.read_state() {
            State::Ready(tokenizer) => Ok(Arc::clone(tokenizer)),
            other => Err(TokenizerError::NotInitialized {
                status: other.status(),
            }),
        }
    }

    /// Segment text. Fails with `NotInitialized` unless the session is ready.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.tokenizer()?.tokenize(text))
    }

    /// Count tokens. Fails with `NotInitialized` unless the session is ready.
    pub fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(self.tokenizer()?.count(text))
    }

    /// Load the tokenizer if it is not ready yet, then return it.
    ///
    /// Callers that arrive while another load is in flight wait for it and
    /// share its outcome, including its failure. A call made after a failure
    /// has been observed starts a new attempt; nothing is retried
    /// automatically.
    pub async fn ensure_loaded(&self) -> Result<Arc<Tokenizer>> {
        if let Ok(tokenizer) = self.tokenizer() {
            return Ok(tokenizer);
        }

        let seen_attempts = self.attempts.load(Ordering::Acquire);
        let _guard = self.load_lock.lock().await;

        let settled = {
            let state = self.read_state();
            match &*state {
                State::Ready(tokenizer) => Some(Ok(Arc::clone(tokenizer))),
                State::Failed(message)
                    if self.attempts.load(Ordering::Acquire) != seen_attempts =>
                {
                    Some(Err(TokenizerError::LoadFailed(message.clone())))
                }
                _ => None,
            }
        };
        if let Some(result) = settled {
            return result;
        }

        let source = self.source.as_ref().ok_or_else(|| {
            TokenizerError::InvalidConfig("tokenizer session has no vocabulary source".to_string())
        })?;

        self.set_state(State::Loading);
        let mut loading = LoadingGuard {
            session: self,
            armed: true,
        };
        let outcome = source.load().await;
        loading.armed = false;
        self.attempts.fetch_add(1, Ordering::AcqRel);

        match outcome {
            Ok((vocab, merges)) => {
                info!(
                    vocab = vocab.len(),
                    merges = merges.len(),
                    "tokenizer session ready"
                );
                Ok(self.initialize(vocab, merges))
            }
            Err(err) => {
                warn!(%err, "tokenizer load failed");
                self.set_state(State::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Drop the tokenizer and return to `Uninitialized` (session teardown).
    pub fn reset(&self) {
        self.set_state(State::Uninitialized);
    }
}

/// Returns the session to `Uninitialized` if a load future is dropped
/// before the load completes.
struct LoadingGuard<'a> {
    session: &'a TokenizerSession,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.set_state(State::Uninitialized);
        }
    }
}
