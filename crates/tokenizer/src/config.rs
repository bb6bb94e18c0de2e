//! Tokenizer resource configuration.

use chatbpe_core::{Result, TokenizerError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable naming the tokenizer resource (URL or file path).
pub const TOKENIZER_JSON_ENV: &str = "TOKENIZER_JSON";

/// Environment variable switching malformed merge entries from skipped to fatal.
pub const STRICT_MERGES_ENV: &str = "TOKENIZER_STRICT_MERGES";

/// Where the vocabulary and merge resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// Fetched over HTTP(S)
    Url(String),
    /// Read from the local filesystem
    Path(PathBuf),
}

impl ResourceLocation {
    /// Classify a location string: `http://` and `https://` are URLs,
    /// anything else is a filesystem path.
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(TokenizerError::InvalidConfig(
                "tokenizer resource location is empty".to_string(),
            ));
        }

        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(ResourceLocation::Url(location.to_string()))
        } else {
            Ok(ResourceLocation::Path(PathBuf::from(location)))
        }
    }
}

impl FromStr for ResourceLocation {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::Url(url) => f.write_str(url),
            ResourceLocation::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What to do with a merge entry that is not two space-separated tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Log and drop the entry; the remaining rules keep their relative order
    #[default]
    Skip,
    /// Fail the whole load with `MalformedMergeRule`
    Reject,
}

/// Configuration for loading a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Location of the vocabulary + merges JSON resource
    pub source: ResourceLocation,
    /// Handling of malformed merge entries
    pub malformed_merges: MergePolicy,
    /// Request timeout for URL sources
    pub request_timeout: Duration,
}

impl TokenizerConfig {
    /// Default request timeout for URL sources.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a configuration with default settings for the given source.
    pub fn new(source: ResourceLocation) -> Self {
        Self {
            source,
            malformed_merges: MergePolicy::default(),
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Create a configuration builder.
    pub fn builder() -> TokenizerConfigBuilder {
        TokenizerConfigBuilder::new()
    }

    /// Read configuration from the process environment.
    ///
    /// `TOKENIZER_JSON` is required; `TOKENIZER_STRICT_MERGES` set to `1` or
    /// `true` selects [`MergePolicy::Reject`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let location = lookup(TOKENIZER_JSON_ENV).ok_or_else(|| {
            TokenizerError::InvalidConfig(format!("{} is not set", TOKENIZER_JSON_ENV))
        })?;

        let strict = lookup(STRICT_MERGES_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Self::builder()
            .location(&location)?
            .malformed_merges(if strict {
                MergePolicy::Reject
            } else {
                MergePolicy::Skip
            })
            .build()
    }
}

/// Builder for [`TokenizerConfig`].
#[derive(Debug, Clone, Default)]
pub struct TokenizerConfigBuilder {
    source: Option<ResourceLocation>,
    malformed_merges: MergePolicy,
    request_timeout: Option<Duration>,
}

impl TokenizerConfigBuilder {
    /// Create a new builder with default settings and no source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resource location.
    pub fn source(mut self, source: ResourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the resource location from a URL or path string.
    pub fn location(self, location: &str) -> Result<Self> {
        Ok(self.source(ResourceLocation::parse(location)?))
    }

    /// Set the malformed merge policy.
    pub fn malformed_merges(mut self, policy: MergePolicy) -> Self {
        self.malformed_merges = policy;
        self
    }

    /// Set the request timeout for URL sources.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<TokenizerConfig> {
        let source = self.source.ok_or_else(|| {
            TokenizerError::InvalidConfig("no tokenizer resource location given".to_string())
        })?;

        let request_timeout = self
            .request_timeout
            .unwrap_or(TokenizerConfig::DEFAULT_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(TokenizerError::InvalidConfig(
                "request timeout must be non-zero".to_string(),
            ));
        }

        Ok(TokenizerConfig {
            source,
            malformed_merges: self.malformed_merges,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_location_classification() {
        assert_eq!(
            ResourceLocation::parse("https://cdn.example.com/tokenizer.json").unwrap(),
            ResourceLocation::Url("https://cdn.example.com/tokenizer.json".to_string())
        );
        assert_eq!(
            "HTTP://host/t.json".parse::<ResourceLocation>().unwrap(),
            ResourceLocation::Url("HTTP://host/t.json".to_string())
        );
        assert_eq!(
            ResourceLocation::parse(" ./models/tokenizer.json ").unwrap(),
            ResourceLocation::Path(PathBuf::from("./models/tokenizer.json"))
        );
        assert!(ResourceLocation::parse("   ").is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = TokenizerConfig::builder()
            .location("tokenizer.json")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.malformed_merges, MergePolicy::Skip);
        assert_eq!(config.request_timeout, TokenizerConfig::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_requires_source() {
        assert!(matches!(
            TokenizerConfig::builder().build(),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = TokenizerConfig::builder()
            .source(ResourceLocation::Path("t.json".into()))
            .request_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            (TOKENIZER_JSON_ENV, "https://example.com/tokenizer.json"),
            (STRICT_MERGES_ENV, "TRUE"),
        ]
        .into_iter()
        .collect();

        let config =
            TokenizerConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
        assert!(matches!(config.source, ResourceLocation::Url(_)));
        assert_eq!(config.malformed_merges, MergePolicy::Reject);
    }

    #[test]
    fn test_from_lookup_missing_location() {
        assert!(matches!(
            TokenizerConfig::from_lookup(|_| None),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }
}
