//! Load functionality for tokenizer resources.
//!
//! This module fetches the vocabulary + merges JSON document from a file or
//! an HTTP(S) URL and turns it into a `Vocabulary` and `MergeTable`.

use super::format::TokenizerResource;
use super::VocabularySource;
use crate::config::{MergePolicy, ResourceLocation, TokenizerConfig};
use async_trait::async_trait;
use chatbpe_core::{MergeTable, Result, TokenizerError, Vocabulary};
use std::path::Path;
use tracing::{debug, info, warn};

/// Tokenizer loader - fetches and parses the configured resource.
pub struct TokenizerLoader {
    config: TokenizerConfig,
    client: reqwest::Client,
}

impl TokenizerLoader {
    /// Create a loader for the given configuration.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TokenizerError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The configuration this loader reads from.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Parse a resource document.
    ///
    /// Malformed merge entries are dropped or rejected per `policy`; the
    /// surviving rules keep their relative order.
    pub fn parse(bytes: &[u8], policy: MergePolicy) -> Result<(Vocabulary, MergeTable)> {
        let resource: TokenizerResource = serde_json::from_slice(bytes)
            .map_err(|e| TokenizerError::Parse(format!("Invalid tokenizer resource: {}", e)))?;
        let model = resource.model;

        let vocab: Vocabulary = model.vocab.iter().map(|(k, &v)| (k, v)).collect();

        let mut merges = MergeTable::with_capacity(model.merges.len());
        let mut skipped = 0usize;
        for (index, entry) in model.merges.iter().enumerate() {
            match entry.to_rule(index) {
                Ok(rule) => merges.push(rule),
                Err(err) if policy == MergePolicy::Skip => {
                    warn!(%err, "skipping malformed merge rule");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            vocab = vocab.len(),
            merges = merges.len(),
            skipped,
            "parsed tokenizer resource"
        );
        Ok((vocab, merges))
    }

    /// Load a resource file synchronously.
    pub fn load_path(path: &Path, policy: MergePolicy) -> Result<(Vocabulary, MergeTable)> {
        let bytes = std::fs::read(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        Self::parse(&bytes, policy)
    }

    async fn read_path(path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|err| TokenizerError::Io {
                path: path.to_path_buf(),
                err,
            })
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TokenizerError::Network(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenizerError::Network(format!(
                "Failed to fetch {}: HTTP {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TokenizerError::Network(format!("Failed to read {}: {}", url, e)))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl VocabularySource for TokenizerLoader {
    async fn load(&self) -> Result<(Vocabulary, MergeTable)> {
        let source = &self.config.source;
        info!(%source, "loading tokenizer resource");

        let bytes = match source {
            ResourceLocation::Url(url) => self.fetch_url(url).await?,
            ResourceLocation::Path(path) => Self::read_path(path).await?,
        };

        let (vocab, merges) = Self::parse(&bytes, self.config.malformed_merges)?;
        info!(
            %source,
            vocab = vocab.len(),
            merges = merges.len(),
            "tokenizer resource loaded"
        );
        Ok((vocab, merges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RESOURCE: &str = r#"{
        "model": {
            "vocab": {"a": 0, "b": 1, "ab": 2},
            "merges": ["a b", "broken", "ab c"]
        }
    }"#;

    #[test]
    fn test_parse_skips_malformed_merges() {
        let (vocab, merges) =
            TokenizerLoader::parse(RESOURCE.as_bytes(), MergePolicy::Skip).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get_id("ab"), Some(2));
        assert_eq!(merges.len(), 2);
        assert_eq!(merges.get(1).map(|r| r.merged().as_str()), Some("abc"));
    }

    #[test]
    fn test_parse_rejects_malformed_merges() {
        let result = TokenizerLoader::parse(RESOURCE.as_bytes(), MergePolicy::Reject);
        match result {
            Err(TokenizerError::MalformedMergeRule { index, entry }) => {
                assert_eq!(index, 1);
                assert_eq!(entry, "broken");
            }
            other => panic!("expected MalformedMergeRule, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_non_string_merge_entry() {
        let json = br#"{"model": {"vocab": {"a": 0, "b": 1}, "merges": ["a b", 7]}}"#;

        let (_, merges) = TokenizerLoader::parse(json, MergePolicy::Skip).unwrap();
        assert_eq!(merges.len(), 1);
        assert_eq!(merges.get(0).map(|r| r.merged().as_str()), Some("ab"));

        match TokenizerLoader::parse(json, MergePolicy::Reject) {
            Err(TokenizerError::MalformedMergeRule { index, entry }) => {
                assert_eq!(index, 1);
                assert_eq!(entry, "7");
            }
            other => panic!("expected MalformedMergeRule, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_negative_vocab_ids() {
        let json = br#"{"model": {"vocab": {"a": -1, "b": -1, "ab": 5}, "merges": ["a b"]}}"#;

        let (vocab, merges) = TokenizerLoader::parse(json, MergePolicy::Reject).unwrap();
        assert_eq!(vocab.get_id("a"), Some(-1));
        assert_eq!(vocab.get_id("b"), Some(-1));
        assert_eq!(merges.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = TokenizerLoader::parse(b"{not json", MergePolicy::Skip);
        assert!(matches!(result, Err(TokenizerError::Parse(_))));

        let result = TokenizerLoader::parse(br#"{"model": {"vocab": {}}}"#, MergePolicy::Skip);
        assert!(matches!(result, Err(TokenizerError::Parse(_))));
    }

    #[test]
    fn test_load_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RESOURCE.as_bytes()).unwrap();

        let (vocab, merges) = TokenizerLoader::load_path(file.path(), MergePolicy::Skip).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(merges.len(), 2);
    }

    #[test]
    fn test_load_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("tokenizer.json");
        let err = TokenizerLoader::load_path(&missing, MergePolicy::Skip).unwrap_err();
        assert!(matches!(err, TokenizerError::Io { .. }));
        assert!(err.is_load_failure());
    }

    #[tokio::test]
    async fn test_async_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RESOURCE.as_bytes()).unwrap();

        let config = TokenizerConfig::new(ResourceLocation::Path(file.path().to_path_buf()));
        let loader = TokenizerLoader::new(config).unwrap();
        let (vocab, merges) = loader.load().await.unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(merges.len(), 2);
    }
}
