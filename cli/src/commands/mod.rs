//! CLI commands for the chatbpe token counter.

pub mod benchmark;
pub mod count;
pub mod tokenize;

pub use benchmark::BenchmarkCommand;
pub use count::CountCommand;
pub use tokenize::TokenizeCommand;

use anyhow::{Context, Result as AnyhowResult};
use chatbpe_tokenizer::{MergePolicy, Tokenizer, TokenizerConfig, TokenizerSession};
use clap::Args;
use std::io::Read;
use std::sync::Arc;

/// Options shared by every command for locating the tokenizer resource.
#[derive(Args)]
pub struct SourceArgs {
    /// Tokenizer JSON resource (file path or http(s) URL)
    #[arg(short, long, env = "TOKENIZER_JSON")]
    pub tokenizer: String,

    /// Fail on malformed merge entries instead of skipping them
    #[arg(long, default_value_t = false)]
    pub strict_merges: bool,
}

impl SourceArgs {
    /// Load the tokenizer through a session, as the chat client does.
    pub async fn load(&self) -> AnyhowResult<Arc<Tokenizer>> {
        let policy = if self.strict_merges {
            MergePolicy::Reject
        } else {
            MergePolicy::Skip
        };
        let config = TokenizerConfig::builder()
            .location(&self.tokenizer)?
            .malformed_merges(policy)
            .build()?;

        let session = TokenizerSession::from_config(config)?;
        session
            .ensure_loaded()
            .await
            .with_context(|| format!("loading tokenizer from {}", self.tokenizer))
    }
}

/// Read `input` literally, or stdin when it is "-".
pub fn read_text(input: &str) -> AnyhowResult<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(input.to_string())
    }
}

/// Read the file at `path`, or stdin when it is "-".
pub fn read_file(path: &str) -> AnyhowResult<String> {
    if path == "-" {
        read_text(path)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path))
    }
}
