//! Loading vocabulary and merge resources.
//!
//! The [`VocabularySource`] trait is the one asynchronous seam of the
//! crate; [`TokenizerLoader`] implements it for files and HTTP(S) URLs.

pub mod format;
pub mod load;

pub use format::{MergeEntry, TokenizerResource};
pub use load::TokenizerLoader;

use async_trait::async_trait;
use chatbpe_core::{MergeTable, Result, Vocabulary};

/// Asynchronous provider of a vocabulary and its merge table.
#[async_trait]
pub trait VocabularySource: Send + Sync {
    /// Fetch and parse the resource.
    async fn load(&self) -> Result<(Vocabulary, MergeTable)>;
}
